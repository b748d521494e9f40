//! TypeScript AST for the generated artifacts and its [`Emit`] impls.
//!
//! Types and imports are structured nodes; class and function bodies whose
//! shape does not fit the AST are carried as [`TsItem::Raw`] blocks.

use super::Emit;
use super::utils::{escape_js_string, quote_if_needed};

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
    /// `unknown`
    Unknown,
    /// `never`
    Never,
}

/// TypeScript literal values
#[derive(Debug, Clone, PartialEq)]
pub enum TsLiteral {
    /// Double-quoted string literal.
    String(String),
    /// Non-integral number.
    Number(f64),
    /// Integer.
    Int(i64),
    /// `true` or `false`.
    Bool(bool),
    /// `null`
    Null,
}

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// string, number, boolean, null, unknown, never
    Primitive(TsPrimitive),
    /// T[]
    Array(Box<TsType>),
    /// A | B | C
    Union(Vec<TsType>),
    /// { foo: string; bar?: number }
    Object(Vec<TsProp>),
    /// Record<K, V>
    Record {
        /// Key type.
        key: Box<TsType>,
        /// Value type.
        value: Box<TsType>,
    },
    /// "foo", 42, true
    Literal(TsLiteral),
    /// Named type reference
    Ref(String),
}

/// Object property definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    /// Property key, quoted on emission when not a valid identifier.
    pub name: String,
    /// Property type.
    pub ty: TsType,
    /// Emitted with `?`.
    pub optional: bool,
    /// Doc comment emitted above the property in interfaces.
    pub description: Option<String>,
}

/// Type definition kind
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefKind {
    /// interface Foo { ... }
    Interface {
        /// Members in declared order.
        properties: Vec<TsProp>,
    },
    /// type Foo = ...
    TypeAlias {
        /// Aliased type.
        ty: TsType,
    },
}

/// Exported type definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsTypeDef {
    /// Declared identifier.
    pub name: String,
    /// Interface or alias body.
    pub kind: TypeDefKind,
}

/// Named import binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportItem {
    /// Exported name being imported.
    pub name: String,
}

impl ImportItem {
    /// Binding for `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsImport {
    /// Default import binding: `import X from "..."`
    pub default: Option<String>,
    /// Named bindings inside the braces.
    pub items: Vec<ImportItem>,
    /// Module specifier.
    pub from: String,
    /// Whether this is a type-only import
    pub type_only: bool,
}

/// Top-level module item
#[derive(Debug, Clone, PartialEq)]
pub enum TsItem {
    /// An exported interface or type alias.
    TypeDef(TsTypeDef),
    /// A line comment: `// text`
    Comment(String),
    /// Pre-formatted code block
    Raw(String),
}

/// Complete TypeScript module
#[derive(Debug, Clone, PartialEq)]
pub struct TsModule {
    /// First-line banner comment.
    pub header: String,
    /// Import statements, emitted in order after the header.
    pub imports: Vec<TsImport>,
    /// Body items, separated by blank lines.
    pub items: Vec<TsItem>,
}

impl TsModule {
    /// Empty module with a banner comment.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            imports: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Add an import unless it would be empty.
    pub fn import(&mut self, items: Vec<ImportItem>, from: &str, type_only: bool) {
        if items.is_empty() {
            return;
        }
        self.imports.push(TsImport {
            default: None,
            items,
            from: from.to_string(),
            type_only,
        });
    }

    /// Add `import name from "from";`.
    pub fn import_default(&mut self, name: &str, from: &str) {
        self.imports.push(TsImport {
            default: Some(name.to_string()),
            items: Vec::new(),
            from: from.to_string(),
            type_only: false,
        });
    }

    /// Append an item.
    pub fn push(&mut self, item: TsItem) {
        self.items.push(item);
    }

    /// Append a line comment.
    pub fn comment(&mut self, text: impl Into<String>) {
        self.items.push(TsItem::Comment(text.into()));
    }

    /// Append a pre-formatted code block.
    pub fn raw(&mut self, code: impl Into<String>) {
        self.items.push(TsItem::Raw(code.into()));
    }
}

// =============================================================================
// Emission
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string",
            TsPrimitive::Number => "number",
            TsPrimitive::Boolean => "boolean",
            TsPrimitive::Null => "null",
            TsPrimitive::Unknown => "unknown",
            TsPrimitive::Never => "never",
        }
        .to_string()
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            TsLiteral::String(s) => format!("\"{}\"", escape_js_string(s)),
            TsLiteral::Number(n) => n.to_string(),
            TsLiteral::Int(i) => i.to_string(),
            TsLiteral::Bool(b) => b.to_string(),
            TsLiteral::Null => "null".to_string(),
        }
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => {
                let inner_str = inner.emit();
                // Wrap unions in parentheses
                if matches!(**inner, TsType::Union(_)) {
                    format!("({inner_str})[]")
                } else {
                    format!("{inner_str}[]")
                }
            }
            TsType::Union(types) => types.iter().map(|t| t.emit()).collect::<Vec<_>>().join(" | "),
            TsType::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    let parts: Vec<_> = props.iter().map(|p| p.emit()).collect();
                    format!("{{ {} }}", parts.join("; "))
                }
            }
            TsType::Record { key, value } => format!("Record<{}, {}>", key.emit(), value.emit()),
            TsType::Literal(lit) => lit.emit(),
            TsType::Ref(name) => name.clone(),
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let key = quote_if_needed(&self.name);
        let opt = if self.optional { "?" } else { "" };
        format!("{key}{opt}: {}", self.ty.emit())
    }
}

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        match &self.kind {
            TypeDefKind::Interface { properties } => {
                let mut output = format!("export interface {} {{\n", self.name);
                for prop in properties {
                    if let Some(description) = &prop.description {
                        output.push_str(&format!("  /** {} */\n", description.replace("*/", "* /")));
                    }
                    output.push_str(&format!("  {};\n", prop.emit()));
                }
                output.push_str("}\n");
                output
            }
            TypeDefKind::TypeAlias { ty } => format!("export type {} = {};\n", self.name, ty.emit()),
        }
    }
}

impl Emit for ImportItem {
    fn emit(&self) -> String {
        self.name.clone()
    }
}

impl Emit for TsImport {
    fn emit(&self) -> String {
        let type_kw = if self.type_only { "type " } else { "" };
        let mut bindings = Vec::new();
        if let Some(default) = &self.default {
            bindings.push(default.clone());
        }
        if !self.items.is_empty() {
            let items = self.items.iter().map(|i| i.emit()).collect::<Vec<_>>().join(", ");
            bindings.push(format!("{{ {items} }}"));
        }
        format!("import {type_kw}{} from \"{}\";", bindings.join(", "), self.from)
    }
}

impl Emit for TsItem {
    fn emit(&self) -> String {
        match self {
            TsItem::TypeDef(def) => def.emit(),
            TsItem::Comment(text) => format!("// {text}\n"),
            TsItem::Raw(code) => {
                if code.ends_with('\n') {
                    code.clone()
                } else {
                    format!("{code}\n")
                }
            }
        }
    }
}

impl Emit for TsModule {
    fn emit(&self) -> String {
        let mut output = format!("// {}\n", self.header);

        if !self.imports.is_empty() {
            for import in &self.imports {
                output.push_str(&import.emit());
                output.push('\n');
            }
        }

        for item in &self.items {
            output.push('\n');
            output.push_str(&item.emit());
        }

        output
    }
}
