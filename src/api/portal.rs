pub mod models;

use std::time::Duration;

use bon::bon;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use self::models::{ChannelData, Component, PortalDate, Session};
use super::client;
use crate::{
    core::series::{AggregatedSeries, CombineChannels},
    prelude::*,
};

const DEFAULT_BASE_URL: &str = "https://api.enerest.world";
const DEFAULT_AUTH_URL: &str = "https://auth.enerest.world";

/// Channels summable across inverters: DC power and cumulative energy production.
const INVERTER_PRODUCTION_CHANNELS: [&str; 2] = ["ProdPdc", "ProdEtotal"];

/// Portal API client.
///
/// Holds at most one [`Session`]; [`Api::login`] takes `&mut self`, so the
/// token is necessarily established before any shared-reference reads run
/// concurrently.
pub struct Api {
    client: reqwest::Client,
    base_url: String,
    auth_url: String,
    portal: String,
    session: Option<Session>,
}

#[bon]
impl Api {
    /// Build a client for one portal tenant.
    ///
    /// Every instance owns its session independently, so one process can talk
    /// to several portals at once.
    #[builder]
    pub fn new(
        /// Tenant identifier scoping which organization's plants are visible.
        #[builder(into)]
        portal: String,
        #[builder(into, default = DEFAULT_BASE_URL.to_owned())] base_url: String,
        #[builder(into, default = DEFAULT_AUTH_URL.to_owned())] auth_url: String,
        #[builder(default = Duration::from_secs(10))] timeout: Duration,
    ) -> Result<Self> {
        Ok(Self { client: client::try_new(timeout)?, base_url, auth_url, portal, session: None })
    }
}

impl Api {
    /// Exchange client credentials for a bearer token and store it for all
    /// subsequent calls.
    ///
    /// The token is never refreshed automatically: once the portal starts
    /// rejecting it, call `login` again.
    #[instrument(skip_all, fields(client_id = client_id))]
    pub async fn login(&mut self, client_id: &str, client_secret: &str) -> Result<&Session> {
        info!("requesting an access token…");

        #[derive(Serialize)]
        struct TokenRequest<'a> {
            grant_type: &'a str,
            client_id: &'a str,
            client_secret: &'a str,
        }

        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: Option<String>,
        }

        let response = self
            .client
            .post(format!(
                "{}/auth/realms/quotaapi/protocol/openid-connect/token",
                self.auth_url
            ))
            .form(&TokenRequest { grant_type: "client_credentials", client_id, client_secret })
            .send()
            .await
            .map_err(|error| Error::auth("failed to call the token endpoint", error))?
            .error_for_status()
            .map_err(|error| Error::auth("the token request was rejected", error))?
            .json::<TokenResponse>()
            .await
            .map_err(|error| Error::auth("failed to deserialize the token response", error))?;
        let access_token = response.access_token.ok_or_else(Error::missing_access_token)?;
        debug!("access token obtained");
        Ok(self
            .session
            .insert(Session::new(access_token, client_id.to_owned(), client_secret.to_owned())))
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// All components registered for the plant as of the given date.
    #[instrument(skip_all, fields(plant_id = plant_id, date = %date))]
    pub async fn get_components(
        &self,
        plant_id: &str,
        date: PortalDate,
    ) -> Result<Vec<Component>> {
        info!("fetching components…");
        let components: Vec<Component> =
            self.get(&format!("datasource/plant/{plant_id}/components/{date}"), &[]).await?;
        debug!(n_components = components.len(), "fetched");
        Ok(components)
    }

    /// [`Api::get_components`] narrowed to inverters, original order kept.
    #[instrument(skip_all, fields(plant_id = plant_id, date = %date))]
    pub async fn get_inverters(&self, plant_id: &str, date: PortalDate) -> Result<Vec<Component>> {
        let mut components = self.get_components(plant_id, date).await?;
        components.retain(Component::is_inverter);
        Ok(components)
    }

    /// Named channel series for a set of components over `[date_from, date_to]`
    /// inclusive, one record per component, channel, and date.
    #[instrument(
        skip_all,
        fields(
            plant_id = plant_id,
            component_ids = ?component_ids,
            channel_names = ?channel_names,
            date_from = %date_from,
            date_to = %date_to,
        ),
    )]
    pub async fn get_cross_epoch_channels(
        &self,
        plant_id: &str,
        component_ids: &[&str],
        channel_names: &[&str],
        date_from: PortalDate,
        date_to: PortalDate,
    ) -> Result<Vec<ChannelData>> {
        info!("fetching cross-epoch channel data…");
        let mut query: Vec<(&str, String)> =
            Vec::with_capacity(component_ids.len() + channel_names.len() + 2);
        query.extend(component_ids.iter().map(|id| ("xComponentIds", (*id).to_owned())));
        query.extend(channel_names.iter().map(|name| ("channelNames", (*name).to_owned())));
        query.push(("dateFrom", date_from.to_string()));
        query.push(("dateTo", date_to.to_string()));
        self.get(&format!("visualization/plant/{plant_id}/cross-epoch/channels"), &query).await
    }

    /// Plant-level channel series, optionally narrowed to specific MPP trackers.
    #[instrument(
        skip_all,
        fields(
            plant_id = plant_id,
            channel_names = ?channel_names,
            date_from = %date_from,
            date_to = %date_to,
        ),
    )]
    pub async fn get_channels(
        &self,
        plant_id: &str,
        date_from: PortalDate,
        date_to: PortalDate,
        channel_names: &[&str],
        mpp_tracker_ids: Option<&[&str]>,
    ) -> Result<Vec<ChannelData>> {
        info!("fetching channel data…");
        let mut query: Vec<(&str, String)> = vec![
            ("dateFrom", date_from.to_string()),
            ("dateTo", date_to.to_string()),
        ];
        query.extend(channel_names.iter().map(|name| ("channelNames", (*name).to_owned())));
        if let Some(mpp_tracker_ids) = mpp_tracker_ids {
            query.extend(mpp_tracker_ids.iter().map(|id| ("mppTrackerIds", (*id).to_owned())));
        }
        self.get(&format!("visualization/plant/{plant_id}/channels"), &query).await
    }

    /// Channel data pre-aggregated by the portal for one calendar month.
    #[instrument(skip_all, fields(plant_id = plant_id, year = year, month = month))]
    pub async fn get_channel_data_for_month(
        &self,
        plant_id: &str,
        year: i32,
        month: u32,
        channel_names: &[&str],
    ) -> Result<Vec<ChannelData>> {
        info!("fetching monthly channel data…");
        let query = channel_name_query(channel_names);
        self.get(&format!("visualization/plant/{plant_id}/year/{year}/month/{month}"), &query)
            .await
    }

    /// Channel data pre-aggregated by the portal for one calendar year.
    #[instrument(skip_all, fields(plant_id = plant_id, year = year))]
    pub async fn get_channel_data_for_year(
        &self,
        plant_id: &str,
        year: i32,
        channel_names: &[&str],
    ) -> Result<Vec<ChannelData>> {
        info!("fetching yearly channel data…");
        let query = channel_name_query(channel_names);
        self.get(&format!("visualization/plant/{plant_id}/year/{year}"), &query).await
    }

    /// Channel data pre-aggregated by the portal over the plant's entire lifetime.
    #[instrument(skip_all, fields(plant_id = plant_id))]
    pub async fn get_channel_data_lifetime(
        &self,
        plant_id: &str,
        channel_names: &[&str],
    ) -> Result<Vec<ChannelData>> {
        info!("fetching lifetime channel data…");
        let query = channel_name_query(channel_names);
        self.get(&format!("visualization/plant/{plant_id}/lifetime"), &query).await
    }

    /// Production of the given inverters, summed per channel and date.
    ///
    /// Fetches `ProdPdc` and `ProdEtotal` for every component and folds the
    /// per-component series into one total series per `<channel>_<date>` key.
    #[instrument(
        skip_all,
        fields(
            plant_id = plant_id,
            component_ids = ?component_ids,
            date_from = %date_from,
            date_to = %date_to,
        ),
    )]
    pub async fn get_combined_inverter_data(
        &self,
        plant_id: &str,
        component_ids: &[&str],
        date_from: PortalDate,
        date_to: PortalDate,
    ) -> Result<AggregatedSeries> {
        let series = self
            .get_cross_epoch_channels(
                plant_id,
                component_ids,
                &INVERTER_PRODUCTION_CHANNELS,
                date_from,
                date_to,
            )
            .await?;
        Ok(series.into_iter().map(|data| (data.key(), data.data_points)).combine_channels())
    }

    #[instrument(skip_all, level = Level::DEBUG, fields(path = path))]
    async fn get<R: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<R> {
        let mut request = self
            .client
            .get(format!("{}/api/v1/{}/{path}", self.base_url, self.portal))
            .query(query);
        if let Some(session) = &self.session {
            request = request.bearer_auth(session.access_token());
        }
        request
            .send()
            .await
            .map_err(|error| Error::api(format!("failed to call `{path}`"), error))?
            .error_for_status()
            .map_err(|error| Error::api(format!("`{path}` failed"), error))?
            .json::<R>()
            .await
            .map_err(|error| Error::api(format!("failed to deserialize the `{path}` response"), error))
    }
}

fn channel_name_query(channel_names: &[&str]) -> Vec<(&'static str, String)> {
    channel_names.iter().map(|name| ("channelNames", (*name).to_owned())).collect()
}
