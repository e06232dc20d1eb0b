mod client;
mod portal;

pub use self::portal::{
    Api,
    models::{ChannelData, Component, PortalDate, Session},
};
