use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};
use url::Url;

use crate::error::AppError;
use crate::models::appointment::NewAppointment;
use crate::models::doctor::Doctor;

/// The remote doctors API.
#[async_trait]
pub trait DoctorsApi: Send + Sync {
    async fn fetch_doctors(&self) -> Result<Vec<Doctor>, AppError>;

    async fn create_appointment(
        &self,
        doctor_id: &str,
        appointment: &NewAppointment,
    ) -> Result<(), AppError>;
}

pub struct HttpDoctorsApi {
    client: Client,
    base_url: Url,
}

impl HttpDoctorsApi {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Transport(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl DoctorsApi for HttpDoctorsApi {
    async fn fetch_doctors(&self) -> Result<Vec<Doctor>, AppError> {
        let url = self.endpoint(&["doctors"])?;
        debug!("Making request to {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("API error ({}): {}", status, body);
            return Err(AppError::Transport(format!("GET /doctors returned {}", status)));
        }

        Ok(response.json::<Vec<Doctor>>().await?)
    }

    async fn create_appointment(
        &self,
        doctor_id: &str,
        appointment: &NewAppointment,
    ) -> Result<(), AppError> {
        let url = self.endpoint(&["doctors", doctor_id, "appointments"])?;
        debug!("Making request to {}", url);

        let response = self.client.post(url).json(appointment).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("API error ({}): {}", status, body);
            return Err(AppError::Transport(format!(
                "POST /doctors/{}/appointments returned {}",
                doctor_id, status
            )));
        }

        Ok(())
    }
}
