use crate::app_config::AppConfig;
use crate::domain::{Address, Coordinate};
use crate::platform::PlatformError;
use reqwest::header::HeaderValue;
use reqwest::{Client, header};
use serde::Deserialize;
use tracing::{debug, instrument};

pub fn new_client(config: &AppConfig) -> Result<Client, PlatformError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_str(config.geocoder().user_agent())?);
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    let client = Client::builder().default_headers(headers).build()?;
    Ok(client)
}

/// Reverse geocoder speaking the Nominatim `/reverse` JSON API.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReverseResponse {
    Found { address: AddressGet },
    NotFound { error: String },
}

#[derive(Debug, Deserialize)]
struct AddressGet {
    road: Option<String>,
    house_number: Option<String>,
    suburb: Option<String>,
    city_district: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
    country: Option<String>,
}

impl From<AddressGet> for Address {
    fn from(address: AddressGet) -> Self {
        Address {
            street: address.road,
            street_number: address.house_number,
            district: address.suburb.or(address.city_district),
            region: address.state,
            postal_code: address.postcode,
            country: address.country,
        }
    }
}

impl NominatimGeocoder {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        NominatimGeocoder {
            client,
            url: url.into().trim_end_matches('/').to_string(),
        }
    }

    #[instrument(skip(self))]
    pub async fn reverse(&self, coordinate: Coordinate) -> Result<Vec<Address>, PlatformError> {
        debug!("🏠 Reverse geocoding...");
        let response = self
            .client
            .get(format!("{}/reverse", self.url))
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", coordinate.latitude.to_string()),
                ("lon", coordinate.longitude.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        match response.json::<ReverseResponse>().await? {
            ReverseResponse::Found { address } => {
                debug!("🏠 Reverse geocoding... OK");
                Ok(vec![address.into()])
            }
            ReverseResponse::NotFound { error } => {
                debug!("🏠 Reverse geocoding... OK, no address found: {}", error);
                Ok(Vec::new())
            }
        }
    }
}
