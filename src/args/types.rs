use std::num::{NonZeroU64, NonZeroUsize};

use clap::ValueEnum;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::domain::ProtocolKind;
use crate::error::ValidationError;

/// Request methods accepted on the command line and in config files.
#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    #[must_use]
    pub fn to_method(self) -> Method {
        match self {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }
}

/// Wire protocol selector. Only `http` has a transport; `grpc` is accepted
/// here and rejected when the transport is built.
#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Grpc,
}

impl Protocol {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.to_domain().as_str()
    }

    #[must_use]
    pub const fn to_domain(self) -> ProtocolKind {
        match self {
            Protocol::Http => ProtocolKind::Http,
            Protocol::Grpc => ProtocolKind::Grpc,
        }
    }
}

macro_rules! positive_newtype {
    ($name:ident, $inner:ty, $nonzero:ty) => {
        /// A count that is at least one.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name($nonzero);

        impl $name {
            #[must_use]
            pub const fn get(self) -> $inner {
                self.0.get()
            }
        }

        impl TryFrom<$inner> for $name {
            type Error = ValidationError;

            fn try_from(value: $inner) -> Result<Self, Self::Error> {
                <$nonzero>::new(value)
                    .map($name)
                    .ok_or(ValidationError::ValueMustBePositive)
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value: $inner =
                    s.trim()
                        .parse()
                        .map_err(|err| ValidationError::InvalidNumber {
                            value: s.to_owned(),
                            source: err,
                        })?;
                $name::try_from(value)
            }
        }

        impl From<$name> for $inner {
            fn from(value: $name) -> Self {
                value.get()
            }
        }
    };
}

positive_newtype!(PositiveU64, u64, NonZeroU64);
positive_newtype!(PositiveUsize, usize, NonZeroUsize);
