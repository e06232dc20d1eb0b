//! Typed async client for the Enerest solar monitoring portal.
//!
//! The portal speaks plain HTTP: an OAuth2 client-credentials token exchange,
//! followed by bearer-authenticated GET requests for plant components and
//! channel time series. This crate wraps those endpoints as typed method
//! calls and adds the one piece of client-side computation the portal does
//! not offer: combining per-component series into per-channel totals.
//!
//! ```no_run
//! # async fn example() -> enerest::Result {
//! use enerest::{Api, PortalDate};
//!
//! let mut api = Api::builder().portal("my-portal").build()?;
//! api.login("client-id", "client-secret").await?;
//!
//! let inverters = api.get_inverters("plant-1", PortalDate::Today).await?;
//! let inverter_ids: Vec<&str> = inverters.iter().map(|inverter| inverter.id.as_str()).collect();
//! let production = api
//!     .get_combined_inverter_data("plant-1", &inverter_ids, PortalDate::Today, PortalDate::Today)
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod api;
mod core;
mod error;
mod prelude;

pub use crate::{
    api::{Api, ChannelData, Component, PortalDate, Session},
    core::series::{AggregatedSeries, CombineChannels},
    error::{Error, Result},
};
