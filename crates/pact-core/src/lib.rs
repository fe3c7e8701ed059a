//! Pact Core Foundation Library
//!
//! Pure value types shared by the Pact parser, evaluator and storage layer:
//!
//! - **Names**: module, keyset and qualified names (`names`)
//! - **Hashes**: blake2b-256 hashes with base64url text form (`hash`)
//! - **Literals** and the ordered field container (`literal`, `object`)
//! - **Guards**: the six authorization forms and their tag-free JSON codec (`guards`, `capability`)
//! - **Errors**: the located error carrier and diagnostic rendering (`errors`)
//! - **Gas**: gas units (`gas`)

pub mod capability;
pub mod errors;
pub mod gas;
pub mod guards;
pub mod hash;
pub mod literal;
pub mod names;
pub mod object;
pub mod shared;


pub use capability::{CapabilityGuard, ModuleGuard, PactGuard, UserGuard};
pub use errors::diagnostic::{render_diagnostic, DiagnosticConfig};
pub use errors::{PactError, PactErrorType, StackFrame};
pub use gas::{Gas, MilliGas};
pub use guards::{Guard, GuardDecodeError, GuardKind, KeySet, KeySetPredicate};
pub use hash::{HashError, ModuleHash, PactHash};
pub use literal::Literal;
pub use names::{
    DefPactId, Field, KeySetName, ModuleName, NameParseError, NamespaceName, QualifiedName,
};
pub use object::Object;
pub use shared::{Info, PublicKeyText, SpanInfo};

/// Version information for the pact-core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
