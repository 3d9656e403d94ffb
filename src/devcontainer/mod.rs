//! Devcontainer generation: load the exported extension list, drop the
//! built-in extensions, and write the result into the devcontainer template.

pub mod extensions;
pub mod generator;
pub mod template;

pub use extensions::{
    filter_active_extensions, load_extensions, parse_extensions, ExtensionDescriptor,
    InvalidDescriptor, LoadedExtensions, RESERVED_PREFIX,
};
pub use generator::{ConfigGenerator, GenerationReport, GeneratorError};
pub use template::DevcontainerConfig;
