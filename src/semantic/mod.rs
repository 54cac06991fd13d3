//! Semantic binding over a single source unit.
//!
//! - `metadata`: referenced-assembly descriptions and the built-in catalog
//! - `declarations`: namespaces, types, members and base lists declared in source
//! - `locals`: parameters, locals and local functions inside member bodies
//! - `scope`: enclosing types, namespaces and `using` directives of a node
//! - `model`: `CompilationModel`, name lookup, overload selection and constant folding

pub mod constant;
pub mod declarations;
pub mod locals;
pub mod metadata;
pub mod model;
pub mod scope;
pub mod symbols;

pub use constant::ConstantValue;
pub use metadata::{AssemblyReference, well_known};
pub use model::{CompilationModel, NamespaceOrType};
pub use symbols::{FieldSymbol, MethodSymbol, Parameter, Symbol, SymbolOrigin, TypeSymbol};
