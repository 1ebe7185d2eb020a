use std::io::Read;

use corkboard_api_schema::{
    assignments::SaveAssignmentsResponse,
    upload::{UploadResponse, UPLOAD_FIELD_NAME},
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use self::multipart::MultipartForm;

pub mod multipart;

// everything but RFC 3986 unreserved characters
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Clone)]
pub struct CorkboardApiClient {
    pub base_url: String,
}

#[derive(Debug)]
pub enum CorkboardApiClientError {
    Ureq(Box<ureq::Error>),
    IO(Box<std::io::Error>),
}

impl CorkboardApiClientError {
    /// HTTP status of a non-2xx response, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            CorkboardApiClientError::Ureq(e) => match e.as_ref() {
                ureq::Error::Status(status, _) => Some(*status),
                ureq::Error::Transport(_) => None,
            },
            CorkboardApiClientError::IO(_) => None,
        }
    }
}

impl CorkboardApiClient {
    pub fn new(base_url: String) -> Self {
        let mut base_url = base_url;
        if base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn upload(
        &self,
        file_name: &str,
        data: &[u8],
    ) -> Result<UploadResponse, CorkboardApiClientError> {
        let form = MultipartForm::new().file(UPLOAD_FIELD_NAME, file_name, data);
        self.upload_form(form)
    }

    pub fn upload_form(
        &self,
        form: MultipartForm,
    ) -> Result<UploadResponse, CorkboardApiClientError> {
        let url = format!("{}/upload", self.base_url);
        let (content_type, body) = form.finish();
        let upload_res: UploadResponse = ureq::post(&url)
            .set("Content-Type", &content_type)
            .send_bytes(&body)
            .map_err(|e| CorkboardApiClientError::Ureq(Box::new(e)))?
            .into_json()
            .map_err(|e| CorkboardApiClientError::IO(Box::new(e)))?;
        Ok(upload_res)
    }

    pub fn get_image(&self, file_name: &str) -> Result<Vec<u8>, CorkboardApiClientError> {
        let url = format!(
            "{}/images/{}",
            self.base_url,
            utf8_percent_encode(file_name, PATH_SEGMENT)
        );
        self.get_bytes(&url)
    }

    pub fn get_static(&self, path: &str) -> Result<Vec<u8>, CorkboardApiClientError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.get_bytes(&url)
    }

    pub fn get_assignments(&self) -> Result<serde_json::Value, CorkboardApiClientError> {
        let url = format!("{}/assignments", self.base_url);
        let assignments: serde_json::Value = ureq::get(&url)
            .call()
            .map_err(|e| CorkboardApiClientError::Ureq(Box::new(e)))?
            .into_json()
            .map_err(|e| CorkboardApiClientError::IO(Box::new(e)))?;
        Ok(assignments)
    }

    pub fn save_assignments(
        &self,
        assignments: &serde_json::Value,
    ) -> Result<SaveAssignmentsResponse, CorkboardApiClientError> {
        let url = format!("{}/assignments", self.base_url);
        let save_res: SaveAssignmentsResponse = ureq::post(&url)
            .send_json(assignments)
            .map_err(|e| CorkboardApiClientError::Ureq(Box::new(e)))?
            .into_json()
            .map_err(|e| CorkboardApiClientError::IO(Box::new(e)))?;
        Ok(save_res)
    }

    /// Sends `body` verbatim, without checking that it is JSON.
    pub fn save_assignments_raw(
        &self,
        body: &str,
    ) -> Result<SaveAssignmentsResponse, CorkboardApiClientError> {
        let url = format!("{}/assignments", self.base_url);
        let save_res: SaveAssignmentsResponse = ureq::post(&url)
            .set("Content-Type", "application/json")
            .send_string(body)
            .map_err(|e| CorkboardApiClientError::Ureq(Box::new(e)))?
            .into_json()
            .map_err(|e| CorkboardApiClientError::IO(Box::new(e)))?;
        Ok(save_res)
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, CorkboardApiClientError> {
        let res = ureq::get(url)
            .call()
            .map_err(|e| CorkboardApiClientError::Ureq(Box::new(e)))?;
        let mut data = Vec::new();
        res.into_reader()
            .read_to_end(&mut data)
            .map_err(|e| CorkboardApiClientError::IO(Box::new(e)))?;
        Ok(data)
    }
}
