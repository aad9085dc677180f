//! Vision board core: panel model, board persistence, and masonry layout.
//!
//! A board is a titled, ordered list of panels (images, text, color
//! swatches) kept in a string-keyed preference store. The host UI mutates
//! boards through [`board::BoardContext`] and re-flows the panel list with
//! [`layout::Masonry`] whenever content or container width changes. The two
//! halves never reference each other; [`view`] is the glue the host uses to
//! feed panels into the layout engine.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`board`] | Board model, host actions, load/persist |
//! | [`layout`] | Round-robin masonry column layout |
//! | [`panel`] | Panel sum type, colors, image header probing |
//! | [`reference`] | Item-reference grammar (file URI, `color://`, literal text) |
//! | [`prefs`] | Preference store trait plus memory and JSON-file stores |
//! | [`text`] | Word-wrap measurement for text panels |
//! | [`view`] | Panel adapters implementing [`layout::Flowable`] |
//! | [`config`] | Runtime configuration from the environment |
//! | [`error`] | Stable error codes shared by every error enum |
//! | [`geom`] | Point and size value types |
//! | [`consts`] | Design constants |

pub mod board;
pub mod config;
pub mod consts;
pub mod error;
pub mod geom;
pub mod layout;
pub mod panel;
pub mod prefs;
pub mod reference;
pub mod text;
pub mod view;
