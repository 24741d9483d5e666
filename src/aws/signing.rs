use std::time::SystemTime;

use aws_credential_types::Credentials;
use aws_sigv4::http_request::{SignableBody, SignableRequest, SigningSettings, sign};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use reqwest::{RequestBuilder, Url};

use crate::error::{AppError, AppResult, AwsError};

use super::credentials::AwsCredentials;

const METHOD: &str = "POST";

pub(super) struct SigningTarget<'target> {
    pub credentials: &'target AwsCredentials,
    pub region: &'target str,
    pub service: &'target str,
}

/// Signs a POST request with SigV4 and copies the signature headers onto
/// `builder`. `headers` must be the same headers already set on `builder`.
pub(super) fn sign_request(
    mut builder: RequestBuilder,
    url: &Url,
    headers: &[(&str, String)],
    body: &[u8],
    target: &SigningTarget<'_>,
) -> AppResult<RequestBuilder> {
    let identity: Identity = Credentials::new(
        &target.credentials.access_key,
        &target.credentials.secret_key,
        target.credentials.session_token.clone(),
        None,
        "tablewatch",
    )
    .into();
    let signing_params = v4::SigningParams::builder()
        .identity(&identity)
        .region(target.region)
        .name(target.service)
        .time(SystemTime::now())
        .settings(SigningSettings::default())
        .build()
        .map_err(|err| {
            AppError::aws(AwsError::SigV4Params {
                source: Box::new(err),
            })
        })?
        .into();

    let signable = SignableRequest::new(
        METHOD,
        url.as_str(),
        headers.iter().map(|(key, value)| (*key, value.as_str())),
        SignableBody::Bytes(body),
    )
    .map_err(|err| {
        AppError::aws(AwsError::SigV4Request {
            source: Box::new(err),
        })
    })?;

    let (instructions, _signature) = sign(signable, &signing_params)
        .map_err(|err| {
            AppError::aws(AwsError::SigV4Sign {
                source: Box::new(err),
            })
        })?
        .into_parts();

    let mut http_req = http::Request::builder().method(METHOD).uri(url.as_str());
    for (key, value) in headers {
        http_req = http_req.header(*key, value);
    }
    let mut http_req = http_req.body(()).map_err(|err| {
        AppError::aws(AwsError::SigV4BuildSign {
            source: Box::new(err),
        })
    })?;
    instructions.apply_to_request_http1x(&mut http_req);

    for (name, value) in http_req.headers() {
        if headers
            .iter()
            .any(|(key, _)| name.as_str().eq_ignore_ascii_case(key))
        {
            continue;
        }
        builder = builder.header(name, value);
    }
    Ok(builder)
}
