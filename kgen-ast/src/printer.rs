//! Deterministic Jsonnet printer.
//!
//! Indentation is written automatically after every newline at the current
//! nesting level, so node printers only emit `\n` and never pad by hand.

use crate::{
    Error, Indent, Result,
    ident::is_bare_identifier,
    node::{Apply, Index, Node, Quote, Selector, StringLiteral},
    object::{Field, KeyKind, Object, Signature},
};

/// Printer settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub indent: Indent,
}

impl Config {
    pub fn new(indent: Indent) -> Self {
        Self { indent }
    }

    /// Render `node` to a string.
    ///
    /// Fails fast on the first structural error; no partial output is
    /// returned.
    pub fn print(&self, node: &Node) -> Result<String> {
        let mut printer = Printer::new(*self);
        printer.print(node)?;
        Ok(printer.output)
    }
}

/// Render `node` with the default configuration.
pub fn print(node: &Node) -> Result<String> {
    Config::default().print(node)
}

/// State of a single render pass.
struct Printer {
    config: Config,
    output: String,
    level: usize,
}

impl Printer {
    fn new(config: Config) -> Self {
        Self {
            config,
            output: String::new(),
            level: 0,
        }
    }

    fn write(&mut self, s: &str) {
        for (i, line) in s.split('\n').enumerate() {
            if i > 0 {
                self.output.push('\n');
                self.config.indent.write_to(&mut self.output, self.level);
            }
            self.output.push_str(line);
        }
    }

    fn print(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::Object(object) => self.print_object(object)?,
            Node::Array(elements) => {
                self.write("[");
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.print(element)?;
                }
                self.write("]");
            }
            Node::Str(literal) => self.write(&quote(literal)),
            Node::Number(number) => self.write(&number.text()?),
            Node::Bool(value) => self.write(if *value { "true" } else { "false" }),
            Node::Null => self.write("null"),
            Node::Var(id) => self.write_identifier(id)?,
            Node::SelfRef => self.write("self"),
            Node::Binary(binary) => {
                self.print(&binary.left)?;
                self.write(" ");
                self.write(binary.op.as_str());
                self.write(" ");
                self.print(&binary.right)?;
            }
            Node::Conditional(conditional) => {
                self.write("if ");
                self.print(&conditional.cond)?;
                self.write(" then ");
                self.print(&conditional.then)?;
                if let Some(otherwise) = &conditional.otherwise {
                    self.write(" else ");
                    self.print(otherwise)?;
                }
            }
            Node::Apply(apply) => self.print_apply(apply)?,
            Node::Index(index) => {
                self.print(&index.target)?;
                self.print_selector(index)?;
            }
            Node::Local(local) => {
                self.write("local ");
                self.write_identifier(&local.name)?;
                self.write(" = ");
                self.print(&local.value)?;
                self.write(";");
                if let Some(body) = &local.body {
                    self.write("\n");
                    self.print(body)?;
                }
            }
            Node::Import(path) => {
                self.write("import ");
                self.write(&json_quote(path));
            }
            Node::Function(function) => {
                self.write("function(");
                self.write(&function.params.join(", "));
                self.write(") ");
                self.print(&function.body)?;
            }
        }
        Ok(())
    }

    fn write_identifier(&mut self, id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(Error::EmptyIdentifier);
        }
        self.write(id);
        Ok(())
    }

    fn print_object(&mut self, object: &Object) -> Result<()> {
        if object.is_empty() {
            self.write("{}");
            return Ok(());
        }

        if object.is_oneline() {
            self.write("{ ");
            for field in object.fields() {
                self.print_field(field)?;
                self.write(", ");
            }
            self.write("}");
            return Ok(());
        }

        self.write("{");
        self.level += 1;
        for field in object.fields() {
            self.write("\n");
            self.print_field(field)?;
            self.write(",");
        }
        self.level -= 1;
        self.write("\n}");
        Ok(())
    }

    fn print_field(&mut self, field: &Field) -> Result<()> {
        let key = &field.key;
        if key.name().is_empty() {
            return Err(Error::EmptyIdentifier);
        }

        if let Some(comment) = key.comment() {
            for line in comment.split('\n') {
                let line = line.trim();
                if line.is_empty() {
                    self.write("//\n");
                } else {
                    self.write("// ");
                    self.write(line);
                    self.write("\n");
                }
            }
        }

        match key.kind() {
            KeyKind::Local => {
                self.write("local ");
                self.write(key.name());
                self.print_signature(key.signature())?;
                self.write(" = ");
            }
            KeyKind::Identifier | KeyKind::Str => {
                if key.kind() == KeyKind::Identifier {
                    self.write(key.name());
                } else {
                    self.write(&json_quote(key.name()));
                }
                self.print_signature(key.signature())?;
                if key.is_mixin() {
                    self.write("+");
                }
                self.write(key.visibility().token());
                self.write(" ");
            }
        }

        self.print(&field.value)
    }

    fn print_signature(&mut self, signature: Option<&Signature>) -> Result<()> {
        let Some(signature) = signature else {
            return Ok(());
        };

        let mut params = signature.required.clone();
        for param in &signature.optional {
            let default = self.config.print(&param.default).map_err(|source| {
                Error::InvalidDefaultArgument {
                    name: param.name.clone(),
                    source: Box::new(source),
                }
            })?;
            params.push(format!("{}={}", param.name, default));
        }

        self.write("(");
        self.write(&params.join(", "));
        self.write(")");
        Ok(())
    }

    fn print_apply(&mut self, apply: &Apply) -> Result<()> {
        self.print_call_target(&apply.target)?;
        self.write("(");
        let mut first = true;
        for arg in &apply.args {
            if !first {
                self.write(", ");
            }
            first = false;
            self.print(arg)?;
        }
        for arg in &apply.named {
            if !first {
                self.write(", ");
            }
            first = false;
            self.write(&arg.name);
            self.write("=");
            self.print(&arg.value)?;
        }
        self.write(")");
        Ok(())
    }

    /// Write the target of an application as a dotted chain, outermost
    /// segment last.
    fn print_call_target(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::Var(id) => self.write_identifier(id),
            Node::SelfRef => {
                self.write("self");
                Ok(())
            }
            Node::Index(index) => {
                self.print_call_target(&index.target)?;
                self.print_selector(index)
            }
            Node::Apply(apply) => self.print_apply(apply),
            other => Err(Error::InvalidApplyTarget(other.kind_name())),
        }
    }

    fn print_selector(&mut self, index: &Index) -> Result<()> {
        match &index.selector {
            Selector::Id(id) => {
                self.write(".");
                self.write_identifier(id)
            }
            Selector::Expr(Node::Str(literal)) if is_bare_identifier(&literal.value) => {
                self.write(".");
                self.write(&literal.value);
                Ok(())
            }
            Selector::Expr(Node::Str(literal)) => {
                self.write("[");
                self.write(&quote(literal));
                self.write("]");
                Ok(())
            }
            Selector::Expr(other) => Err(Error::InvalidIndexSelector(other.kind_name())),
        }
    }
}

fn quote(literal: &StringLiteral) -> String {
    match literal.quote {
        Quote::Double => json_quote(&literal.value),
        Quote::Single => single_quote(&literal.value),
    }
}

fn json_quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn single_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
