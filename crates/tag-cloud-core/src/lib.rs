//! Layout engine for tag clouds.
//!
//! - Placement: every rectangle is searched for along an Archimedean spiral around the
//!   cloud center, then compacted toward the center while it stays overlap-free
//! - Overlap tests go through a uniform grid so large clouds stay fast
//! - Data model is serde-serializable; JSON export helpers hand layouts to renderers
//!
//! Quick example:
//! ```
//! use tag_cloud_core::prelude::*;
//! # fn main() -> Result<(), CloudError> {
//! let mut cloud = CircularCloudLayouter::new(Point::new(0, 0));
//! let first = cloud.put_next_rectangle(Size::new(40, 20))?;
//! assert_eq!(first.center(), Point::new(0, 0));
//! let rest: Vec<Rectangle> = cloud
//!     .put_next_rectangles(vec![Size::new(30, 10), Size::new(12, 8)])
//!     .collect::<Result<_, _>>()?;
//! assert!(!rest[0].intersects_with(&first));
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod index;
pub mod layouter;
pub mod model;
pub mod sizes;
pub mod spiral;

pub use config::*;
pub use error::*;
pub use export::*;
pub use layouter::*;
pub use model::*;
pub use spiral::Spiral;

/// Convenience prelude for common types and functions.
/// Importing `tag_cloud_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{CloudConfig, CloudConfigBuilder};
    pub use crate::error::CloudError;
    pub use crate::layouter::{CircularCloudLayouter, PlaceAll};
    pub use crate::model::{CloudLayout, CloudStats, Point, Rectangle, Size, bounding_box};
    pub use crate::spiral::Spiral;
    pub use crate::{to_json, to_json_compact};
}
