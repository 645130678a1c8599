//! # memedo-catalog
//!
//! The declarative side of Memedo: every meme "joke shape" is a
//! [`MemeTemplate`] record naming its backing asset, its caption slots and the
//! few-shot examples handed to the selection model. The [`TemplateRegistry`]
//! serves the catalog by id.

pub mod catalog;
pub mod registry;
pub mod request;
pub mod template;
pub mod validate;

pub use registry::{TemplateInfo, TemplateRegistry};
pub use request::{CaptionFields, RenderRequest};
pub use template::{AssetKind, CaptionSlot, MemeTemplate};
