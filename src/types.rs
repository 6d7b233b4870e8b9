//! Target type model and struct resolution
//!
//! Bridges parsed declarations to layout descriptors. Sizes are fixed and
//! platform-independent rather than probed from the host, so the same input
//! file produces the same layout everywhere:
//!
//! - `char`, `bool`: 1 byte, align 1
//! - `short`: 2 bytes, align 2
//! - `int`, `float`: 4 bytes, align 4
//! - `long`, `double`, pointers: 8 bytes, align 8
//!
//! A nested struct field contributes its whole padded layout as a single
//! descriptor, which is how composite fields end up with an alignment
//! smaller than their size. Arrays contribute element stride times length
//! with the element's alignment.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::layout::{self, FieldDescriptor, LayoutError};
use crate::parser::ast::{BaseType, Field, Program, SourceLocation, StructDef, Type};
use crate::value::Value;

/// Pointer size and alignment, independent of pointee type and depth.
pub const POINTER_DESCRIPTOR: FieldDescriptor = FieldDescriptor::new(8, 8);

/// Size and alignment of a primitive base type, per the fixed table.
/// `None` for `void` and struct references, which have no intrinsic layout.
pub fn primitive_descriptor(base: &BaseType) -> Option<FieldDescriptor> {
    match base {
        BaseType::Char | BaseType::Bool => Some(FieldDescriptor::new(1, 1)),
        BaseType::Short => Some(FieldDescriptor::new(2, 2)),
        BaseType::Int | BaseType::Float => Some(FieldDescriptor::new(4, 4)),
        BaseType::Long | BaseType::Double => Some(FieldDescriptor::new(8, 8)),
        BaseType::Void | BaseType::Struct(_) => None,
    }
}

/// Errors from struct resolution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A field references a struct the registry has never seen.
    #[error("line {}: unknown struct '{name}'", .location.line)]
    UnknownStruct {
        name: String,
        location: SourceLocation,
    },

    /// A struct contains itself by value, directly or through other structs.
    /// Self-reference through a pointer is fine and does not trigger this.
    #[error("line {}: struct '{name}' contains itself by value", .location.line)]
    RecursiveStruct {
        name: String,
        location: SourceLocation,
    },

    /// The same struct name was defined twice.
    #[error("line {}: duplicate definition of struct '{name}'", .location.line)]
    DuplicateStruct {
        name: String,
        location: SourceLocation,
    },

    /// An array field's total byte size does not fit in the address space.
    #[error("line {}: array size overflows", .location.line)]
    OversizedArray { location: SourceLocation },

    /// The layout calculator rejected the resolved descriptors.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// A struct member with its resolved placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub decl: Type,
    pub offset: usize,
    pub size: usize,
    pub align: usize,
    pub padding_before: usize,
    /// The member's zero value, shown next to the declaration in reports.
    pub zero: Value,
}

impl Member {
    /// First byte past the member.
    pub fn end(&self) -> usize {
        self.offset + self.size
    }
}

/// A fully resolved struct: every member placed, total size padded.
#[derive(Debug, Clone, PartialEq)]
pub struct StructLayout {
    pub name: String,
    pub size: usize,
    pub align: usize,
    pub trailing_padding: usize,
    /// Members in layout order (declaration order, unless packed).
    pub members: Vec<Member>,
    /// Where the struct definition starts in the source file.
    pub location: SourceLocation,
}

impl StructLayout {
    /// Total padding bytes, interior and trailing.
    pub fn padding_total(&self) -> usize {
        let interior: usize = self.members.iter().map(|m| m.padding_before).sum();
        interior + self.trailing_padding
    }
}

/// Ordered collection of struct definitions with memoized layouts.
///
/// Declaration order is preserved for display; lookups go through an
/// [`FxHashMap`]. Resolved size/alignment pairs are cached per struct name,
/// so a definition referenced from many places is laid out once.
#[derive(Debug, Clone, Default)]
pub struct StructRegistry {
    defs: FxHashMap<String, StructDef>,
    order: Vec<String>,
    cache: FxHashMap<String, FieldDescriptor>,
}

impl StructRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed file. Duplicate names are an error.
    pub fn from_program(program: Program) -> Result<Self, ResolveError> {
        let mut registry = Self::new();
        for def in program.structs {
            registry.insert(def)?;
        }
        Ok(registry)
    }

    /// Insert one definition, rejecting duplicates.
    pub fn insert(&mut self, def: StructDef) -> Result<(), ResolveError> {
        if self.defs.contains_key(&def.name) {
            return Err(ResolveError::DuplicateStruct {
                name: def.name.clone(),
                location: def.location,
            });
        }
        self.order.push(def.name.clone());
        self.defs.insert(def.name.clone(), def);
        Ok(())
    }

    /// Struct names in declaration order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn get(&self, name: &str) -> Option<&StructDef> {
        self.defs.get(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Size and alignment of any declarable type.
    ///
    /// `use_site` is the position reported if the type references an unknown
    /// struct or closes a by-value cycle.
    pub fn type_layout(
        &mut self,
        ty: &Type,
        use_site: SourceLocation,
    ) -> Result<FieldDescriptor, ResolveError> {
        self.type_layout_guarded(ty, use_site, &mut Vec::new())
    }

    fn type_layout_guarded(
        &mut self,
        ty: &Type,
        use_site: SourceLocation,
        visiting: &mut Vec<String>,
    ) -> Result<FieldDescriptor, ResolveError> {
        let element = self.element_layout(ty, use_site, visiting)?;
        if ty.array_dims.is_empty() {
            return Ok(element);
        }

        // Arrays are element stride times total length, so every element of
        // every dimension keeps the element's alignment. The multiplication
        // is checked: a declared length can be any literal the lexer
        // accepts. Element sizes are already multiples of their alignment,
        // so the stride round-up itself cannot overflow.
        let stride = layout::align_up(element.size, element.align);
        let total = ty
            .array_dims
            .iter()
            .try_fold(stride, |bytes, &dim| bytes.checked_mul(dim))
            .ok_or(ResolveError::OversizedArray { location: use_site })?;
        Ok(FieldDescriptor::new(total, element.align))
    }

    fn element_layout(
        &mut self,
        ty: &Type,
        use_site: SourceLocation,
        visiting: &mut Vec<String>,
    ) -> Result<FieldDescriptor, ResolveError> {
        // Pointers short-circuit before struct recursion, which is what
        // makes self-referential list and tree declarations legal.
        if ty.is_pointer() {
            return Ok(POINTER_DESCRIPTOR);
        }
        if let Some(descriptor) = primitive_descriptor(&ty.base) {
            return Ok(descriptor);
        }
        match &ty.base {
            BaseType::Struct(name) => self.struct_descriptor_guarded(name, use_site, visiting),
            // The parser only lets void through behind a pointer.
            _ => Err(ResolveError::UnknownStruct {
                name: ty.base.to_string(),
                location: use_site,
            }),
        }
    }

    fn struct_descriptor_guarded(
        &mut self,
        name: &str,
        use_site: SourceLocation,
        visiting: &mut Vec<String>,
    ) -> Result<FieldDescriptor, ResolveError> {
        if let Some(cached) = self.cache.get(name) {
            return Ok(*cached);
        }
        if visiting.iter().any(|n| n == name) {
            return Err(ResolveError::RecursiveStruct {
                name: name.to_string(),
                location: use_site,
            });
        }

        let fields = match self.defs.get(name) {
            Some(def) => def.fields.clone(),
            None => {
                return Err(ResolveError::UnknownStruct {
                    name: name.to_string(),
                    location: use_site,
                });
            }
        };

        visiting.push(name.to_string());
        let mut descriptors = Vec::with_capacity(fields.len());
        for field in &fields {
            descriptors.push(self.type_layout_guarded(&field.field_type, field.location, visiting)?);
        }
        visiting.pop();

        let computed = layout::compute_layout(&descriptors)?;
        let descriptor = FieldDescriptor::new(computed.size, computed.align);
        self.cache.insert(name.to_string(), descriptor);
        Ok(descriptor)
    }

    /// Resolve one struct into a full [`StructLayout`], members in
    /// declaration order.
    ///
    /// An unknown `name` is reported with a zero location; there is no use
    /// site to point at.
    pub fn resolve(&mut self, name: &str) -> Result<StructLayout, ResolveError> {
        let def = self.lookup(name)?;
        self.build_struct_layout(&def, false)
    }

    /// Same as [`StructRegistry::resolve`] but with the members permuted by
    /// [`layout::suggest_packing`] before offsets are assigned. Nested
    /// structs keep their declared layout; only this struct's member order
    /// changes.
    pub fn resolve_packed(&mut self, name: &str) -> Result<StructLayout, ResolveError> {
        let def = self.lookup(name)?;
        self.build_struct_layout(&def, true)
    }

    /// Resolve every registered struct, in declaration order.
    pub fn resolve_all(&mut self) -> Result<Vec<StructLayout>, ResolveError> {
        let names = self.order.clone();
        names.iter().map(|name| self.resolve(name)).collect()
    }

    fn lookup(&self, name: &str) -> Result<StructDef, ResolveError> {
        match self.defs.get(name) {
            Some(def) => Ok(def.clone()),
            None => Err(ResolveError::UnknownStruct {
                name: name.to_string(),
                location: SourceLocation::new(0, 0),
            }),
        }
    }

    fn build_struct_layout(
        &mut self,
        def: &StructDef,
        packed: bool,
    ) -> Result<StructLayout, ResolveError> {
        let mut visiting = vec![def.name.clone()];
        let mut descriptors = Vec::with_capacity(def.fields.len());
        for field in &def.fields {
            descriptors.push(self.type_layout_guarded(
                &field.field_type,
                field.location,
                &mut visiting,
            )?);
        }

        let order: Vec<usize> = if packed {
            layout::suggest_packing(&descriptors)
        } else {
            (0..def.fields.len()).collect()
        };
        let ordered_fields: Vec<&Field> = order.iter().map(|&i| &def.fields[i]).collect();
        let ordered_descriptors: Vec<FieldDescriptor> =
            order.iter().map(|&i| descriptors[i]).collect();

        let computed = layout::compute_layout(&ordered_descriptors)?;

        let mut members = Vec::with_capacity(ordered_fields.len());
        for (field, slot) in ordered_fields.iter().zip(&computed.fields) {
            members.push(Member {
                name: field.name.clone(),
                decl: field.field_type.clone(),
                offset: slot.offset,
                size: slot.size,
                align: slot.align,
                padding_before: slot.padding_before,
                zero: Value::zero_of(&field.field_type, self)?,
            });
        }

        Ok(StructLayout {
            name: def.name.clone(),
            size: computed.size,
            align: computed.align,
            trailing_padding: computed.trailing_padding,
            members,
            location: def.location,
        })
    }
}
