// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! About shared pointers. Re-export the [`archery`] crate.
//!
//! Both maps store every value behind a [`SharedPointer`], so a caller can
//! hold on to a value handle independently of the map it was inserted into.
//! The tree and chain structure itself is never shared.
//!
//! [`archery`]: https://docs.rs/archery/latest/

pub use archery::{ArcK, RcK, SharedPointer, SharedPointerKind};

#[cfg(feature = "triomphe")]
pub use archery::ArcTK;

#[cfg(not(feature = "triomphe"))]
/// Default shared pointer used for the values held by [`OrdMap`] and [`HashMap`]. This alias points to [`ArcK`] if `triomphe` is disabled, [`ArcTK`] otherwise.
///
/// [`OrdMap`]: ../ordmap/type.OrdMap.html
/// [`HashMap`]: ../hashmap/type.HashMap.html
/// [`ArcK`]: https://docs.rs/archery/latest/archery/shared_pointer/kind/struct.ArcK.html
/// [`ArcTK`]: https://docs.rs/archery/latest/archery/shared_pointer/kind/struct.ArcTK.html
pub type DefaultSharedPtr = ArcK;

#[cfg(feature = "triomphe")]
/// Default shared pointer used for the values held by [`OrdMap`] and [`HashMap`]. This alias points to [`ArcK`] if `triomphe` is disabled, [`ArcTK`] otherwise.
///
/// [`OrdMap`]: ../ordmap/type.OrdMap.html
/// [`HashMap`]: ../hashmap/type.HashMap.html
/// [`ArcK`]: https://docs.rs/archery/latest/archery/shared_pointer/kind/struct.ArcK.html
/// [`ArcTK`]: https://docs.rs/archery/latest/archery/shared_pointer/kind/struct.ArcTK.html
pub type DefaultSharedPtr = ArcTK;
