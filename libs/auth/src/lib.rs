use std::collections::HashSet;
use std::marker::PhantomData;

use anyhow::Error;
use headers::authorization::{Bearer, Credentials};
use http::{header, Request, Response, StatusCode};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tower_http::validate_request::ValidateRequest;

pub mod access;
pub mod claims;
pub mod media;

use crate::claims::Claims;

/// Subject of service tokens. Entitled to every course and every route.
pub const ANY_ID: &str = "*";

pub struct Keys {
    encoding: EncodingKey,
}

impl Keys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
        }
    }

    pub fn token(&self, claims: &Claims) -> Result<String, Error> {
        Ok(encode(&Header::default(), claims, &self.encoding)?)
    }
}

/// Bearer validation for the authenticated API surface.
///
/// A token passes when it matches one of the configured static service
/// tokens, or when it decodes as a platform-issued JWT. The resulting
/// [`Claims`] land in the request extensions for the route layer. With
/// no secret and no static tokens configured the gateway runs open and
/// every request gets wildcard claims.
pub struct ManyValidate<ResBody> {
    tokens: HashSet<String>,
    decoding: DecodingKey,
    open: bool,
    _marker: PhantomData<fn() -> ResBody>,
}

impl<ResBody> ManyValidate<ResBody> {
    pub fn new(secret: String, tokens: Vec<String>) -> Self {
        Self {
            open: secret.is_empty() && tokens.is_empty(),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            tokens: tokens.into_iter().collect(),
            _marker: PhantomData,
        }
    }
}

impl<ResBody> Clone for ManyValidate<ResBody> {
    fn clone(&self) -> Self {
        Self {
            tokens: self.tokens.clone(),
            decoding: self.decoding.clone(),
            open: self.open,
            _marker: PhantomData,
        }
    }
}

impl<B: Default> ValidateRequest<B> for ManyValidate<B> {
    type ResponseBody = B;

    fn validate(&mut self, request: &mut Request<B>) -> Result<(), Response<Self::ResponseBody>> {
        if self.open {
            request.extensions_mut().insert(Claims::wildcard());
            return Ok(());
        }
        match request.headers().get(header::AUTHORIZATION) {
            Some(auth_header) => match Bearer::decode(auth_header) {
                Some(bearer) if self.tokens.contains(bearer.token()) => {
                    request.extensions_mut().insert(Claims::wildcard());
                    Ok(())
                }
                Some(bearer) => {
                    match decode::<Claims>(bearer.token(), &self.decoding, &Validation::default()) {
                        Ok(token_data) => {
                            request.extensions_mut().insert(token_data.claims);
                            Ok(())
                        }
                        Err(_) => Err(unauthorized()),
                    }
                }
                None => Err(unauthorized()),
            },
            None => Err(unauthorized()),
        }
    }
}

fn unauthorized<B: Default>() -> Response<B> {
    let mut response = Response::new(B::default());
    *response.status_mut() = StatusCode::UNAUTHORIZED;
    response
}
