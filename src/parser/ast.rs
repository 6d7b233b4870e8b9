// AST definitions for struct declaration files

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Base types recognized in field declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseType {
    Char,
    Bool,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
    Struct(String), // struct name
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseType::Char => write!(f, "char"),
            BaseType::Bool => write!(f, "bool"),
            BaseType::Short => write!(f, "short"),
            BaseType::Int => write!(f, "int"),
            BaseType::Long => write!(f, "long"),
            BaseType::Float => write!(f, "float"),
            BaseType::Double => write!(f, "double"),
            BaseType::Void => write!(f, "void"),
            BaseType::Struct(name) => write!(f, "struct {}", name),
        }
    }
}

/// Type representation with pointers and array dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub base: BaseType,
    pub pointer_depth: usize, // 0 = not pointer, 1 = *, 2 = **, etc.
    pub array_dims: Vec<usize>, // declarator order, outermost first
}

impl Type {
    pub fn new(base: BaseType) -> Self {
        Type {
            base,
            pointer_depth: 0,
            array_dims: Vec::new(),
        }
    }

    pub fn with_pointer(mut self) -> Self {
        self.pointer_depth += 1;
        self
    }

    pub fn with_array(mut self, len: usize) -> Self {
        self.array_dims.push(len);
        self
    }

    pub fn is_pointer(&self) -> bool {
        self.pointer_depth > 0
    }

    pub fn is_array(&self) -> bool {
        !self.array_dims.is_empty()
    }

    /// Format as a C declaration of `name`, e.g. `double values[4]` or
    /// `struct Node *next`.
    pub fn c_decl(&self, name: &str) -> String {
        let mut out = format!("{} ", self.base);
        for _ in 0..self.pointer_depth {
            out.push('*');
        }
        out.push_str(name);
        for dim in &self.array_dims {
            out.push_str(&format!("[{}]", dim));
        }
        out
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        if self.pointer_depth > 0 {
            write!(f, " {}", "*".repeat(self.pointer_depth))?;
        }
        for dim in &self.array_dims {
            write!(f, "[{}]", dim)?;
        }
        Ok(())
    }
}

/// A named field inside a struct definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub field_type: Type,
    pub location: SourceLocation,
}

/// A parsed struct definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDef {
    pub name: String,
    pub fields: Vec<Field>,
    pub location: SourceLocation,
}

/// A parsed declaration file, structs in source order
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub structs: Vec<StructDef>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }
}
