use docqa_logging::docqa_debug;
use futures_util::future::try_join_all;
use reqwest::header::LOCATION;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use url::Url;

use crate::settings::{ASK_PATH, HISTORY_PATH, PROCESS_PATH};
use crate::{wire, AnswerPayload, FailureKind, ServiceError, ServiceSettings, UploadFile};

const FILES_FIELD: &str = "files";
const QUESTION_FIELD: &str = "question";
const REDIRECT_LIMIT: usize = 5;

#[async_trait::async_trait]
pub trait QaService: Send + Sync {
    async fn fetch_history(&self) -> Result<Vec<String>, ServiceError>;

    /// Sends every file as one multipart batch under a shared field name.
    async fn process_files(&self, files: &[UploadFile]) -> Result<(), ServiceError>;

    async fn ask_question(&self, question: &str) -> Result<AnswerPayload, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestQaService {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl ReqwestQaService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        // Validate the base URL up front so a typo fails at startup.
        settings.endpoint(HISTORY_PATH)?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    /// POSTs a multipart form, following 307/308 redirects by rebuilding the
    /// form for each hop. A streamed multipart body cannot be replayed, so
    /// reqwest hands those redirects back instead of following them.
    async fn post_form<F>(&self, mut url: Url, build: F) -> Result<Reply, ServiceError>
    where
        F: Fn() -> Result<Form, ServiceError> + Send + Sync,
    {
        for _ in 0..=REDIRECT_LIMIT {
            let response = self
                .client
                .post(url.clone())
                .multipart(build()?)
                .send()
                .await
                .map_err(map_reqwest_error)?;
            if let Some(target) = replayable_redirect(&url, &response) {
                docqa_debug!("POST {} redirected to {}", url, target);
                url = target;
                continue;
            }
            return read_reply(response).await;
        }
        Err(ServiceError::new(
            FailureKind::RedirectLimitExceeded,
            format!("more than {REDIRECT_LIMIT} redirects"),
        ))
    }
}

#[async_trait::async_trait]
impl QaService for ReqwestQaService {
    async fn fetch_history(&self) -> Result<Vec<String>, ServiceError> {
        let url = self.settings.endpoint(HISTORY_PATH)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        wire::parse_history(&read_reply(response).await?.into_success()?)
    }

    async fn process_files(&self, files: &[UploadFile]) -> Result<(), ServiceError> {
        let url = self.settings.endpoint(PROCESS_PATH)?;
        let loaded = try_join_all(files.iter().map(load_file)).await?;

        let reply = self.post_form(url, || batch_form(&loaded)).await?;
        reply.into_success().map(|_| ())
    }

    async fn ask_question(&self, question: &str) -> Result<AnswerPayload, ServiceError> {
        let url = self.settings.endpoint(ASK_PATH)?;
        let reply = self
            .post_form(url, || {
                Ok(Form::new().text(QUESTION_FIELD, question.to_owned()))
            })
            .await?;
        if !reply.status.is_success() {
            return Err(match wire::parse_service_error(&reply.body) {
                Some(message) => ServiceError::new(
                    FailureKind::Service {
                        status: reply.status.as_u16(),
                        message: message.clone(),
                    },
                    message,
                ),
                None => status_error(reply.status),
            });
        }
        wire::parse_answer(&reply.body)
    }
}

struct Reply {
    status: StatusCode,
    body: Vec<u8>,
}

impl Reply {
    fn into_success(self) -> Result<Vec<u8>, ServiceError> {
        if self.status.is_success() {
            Ok(self.body)
        } else {
            Err(status_error(self.status))
        }
    }
}

async fn read_reply(response: reqwest::Response) -> Result<Reply, ServiceError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    Ok(Reply {
        status,
        body: body.to_vec(),
    })
}

/// Target of a 307/308 answer, which must be re-sent with the same body.
fn replayable_redirect(url: &Url, response: &reqwest::Response) -> Option<Url> {
    if !matches!(
        response.status(),
        StatusCode::TEMPORARY_REDIRECT | StatusCode::PERMANENT_REDIRECT
    ) {
        return None;
    }
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    url.join(location).ok()
}

/// File contents read once, so the batch can be rebuilt after a redirect.
struct LoadedFile {
    name: String,
    mime: String,
    bytes: Vec<u8>,
}

async fn load_file(file: &UploadFile) -> Result<LoadedFile, ServiceError> {
    let bytes = tokio::fs::read(&file.path).await.map_err(|err| {
        ServiceError::new(
            FailureKind::FileRead {
                path: file.path.clone(),
            },
            err.to_string(),
        )
    })?;
    let mime = mime_guess::from_path(&file.path).first_or_octet_stream();
    Ok(LoadedFile {
        name: file.name.clone(),
        mime: mime.essence_str().to_string(),
        bytes,
    })
}

fn batch_form(files: &[LoadedFile]) -> Result<Form, ServiceError> {
    files.iter().try_fold(Form::new(), |form, file| {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .map_err(|err| ServiceError::new(FailureKind::InvalidRequest, err.to_string()))?;
        Ok(form.part(FILES_FIELD, part))
    })
}

fn status_error(status: StatusCode) -> ServiceError {
    ServiceError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return ServiceError::new(FailureKind::InvalidRequest, err.to_string());
    }
    ServiceError::new(FailureKind::Network, err.to_string())
}
