use super::Printer;
use autocon_parser::parser::node::{
    ArrowFunctionData, ClassData, ClassPropertyData, FunctionData, MethodData, MethodKind,
    NodeData,
};

impl<'a> Printer<'a> {
    // =========================================================================
    // Functions
    // =========================================================================

    /// Function declarations and function expressions.
    pub(super) fn emit_function(&mut self, func: &FunctionData) {
        if func.is_async {
            self.write("async ");
        }
        self.write("function");
        if func.is_generator {
            self.write("*");
        }
        self.emit_optional_with_space(func.name);
        self.emit_parameters(&func.parameters);
        self.write_space();
        self.emit(func.body);
    }

    pub(super) fn emit_arrow_function(&mut self, arrow: &ArrowFunctionData) {
        if arrow.is_async {
            self.write("async ");
        }
        self.emit_parameters(&arrow.parameters);
        self.write(" => ");
        self.emit(arrow.body);
    }

    /// Class methods and object-literal methods.
    pub(super) fn emit_method(&mut self, method: &MethodData) {
        if method.is_static {
            self.write("static ");
        }
        match method.kind {
            MethodKind::Getter => self.write("get "),
            MethodKind::Setter => self.write("set "),
            MethodKind::Method | MethodKind::Constructor => {}
        }
        if method.is_async {
            self.write("async ");
        }
        if method.is_generator {
            self.write("*");
        }
        self.emit_property_key(method.key, method.computed);
        self.emit_parameters(&method.parameters);
        self.write_space();
        self.emit(method.body);
    }

    // =========================================================================
    // Classes
    // =========================================================================

    /// Class declarations and class expressions.
    pub(super) fn emit_class(&mut self, class: &ClassData) {
        self.write("class");
        self.emit_optional_with_space(class.name);
        if class.heritage.is_some() {
            self.write(" extends ");
            self.emit(class.heritage);
        }
        if class.members.is_empty() {
            self.write(" { }");
            return;
        }
        self.write(" {");
        self.write_line();
        self.increase_indent();
        for &member in &class.members.nodes {
            self.ensure_new_line();
            self.emit(member);
            if matches!(
                self.arena.get(member).map(|n| &n.data),
                Some(NodeData::ClassProperty(_))
            ) {
                self.write_semicolon();
            }
            self.write_line();
        }
        self.decrease_indent();
        self.write("}");
    }

    pub(super) fn emit_class_property(&mut self, prop: &ClassPropertyData) {
        if prop.is_static {
            self.write("static ");
        }
        self.emit_property_key(prop.key, prop.computed);
        if prop.value.is_some() {
            self.write(" = ");
            self.emit(prop.value);
        }
    }
}
