#![warn(missing_docs)]

//! Objects that live inside an armsim room.
//!
//! Two families of objects exist:
//!
//! - **Static objects** never move. They answer point, path and sphere
//!   intersection queries. The variant set is closed: axis-aligned
//!   [`Obstacle`] boxes and thin scoring [`Target`] discs, wrapped in
//!   [`StaticObject`].
//! - **Dynamic objects** are free bodies integrated under gravity. The
//!   only variant is the [`Ball`], which is either attached (stationary
//!   or carried by an arm) or flying.
//!
//! Dynamic objects are stored by the environment in a slot map keyed by
//! [`ObjectId`]; everything else refers to them by id.

mod ball;
mod error;
mod obstacle;
mod static_object;
mod target;

pub use ball::{Ball, GRAVITY};
pub use error::GeometryError;
pub use obstacle::Obstacle;
pub use static_object::StaticObject;
pub use target::{Axis, ScoreRing, Target, HIT_TOLERANCE};

slotmap::new_key_type! {
    /// Stable handle to a dynamic object owned by an environment.
    pub struct ObjectId;
}
