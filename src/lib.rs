//! Interactive world map of recent earthquakes from the USGS summary feed.
//!
//! The pure pieces ([`radius`], [`filters`], [`popup`]) carry the logic; the
//! [`view_state`] module owns the selection and the features on display, and
//! [`server`] exposes both to the Leaflet page in [`html_template`].

pub mod constants;
pub mod feed;
pub mod filters;
pub mod html_template;
pub mod layers;
pub mod popup;
pub mod radius;
pub mod server;
pub mod settings;
pub mod view_state;
