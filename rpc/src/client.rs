//! A convenient way to create a Json-RPC client for the node.
//!
//! If you need more configuration options and / or some custom client you can
//! create one using the [`jsonrpsee`] crate directly.

use std::fmt;

use jsonrpsee::core::client::{BatchResponse, ClientT};
use jsonrpsee::core::params::BatchRequestBuilder;
use jsonrpsee::core::traits::ToRpcParams;
use jsonrpsee::core::ClientError;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::ws_client::{WsClient, WsClientBuilder};
use serde::de::DeserializeOwned;

use crate::Error;

/// Json RPC client.
pub enum Client {
    /// A client using 'http\[s\]' protocol.
    Http(HttpClient),
    /// A client using 'ws\[s\]' protocol.
    Ws(WsClient),
}

impl Client {
    /// Create a new Json RPC client.
    ///
    /// Only 'http\[s\]' and 'ws\[s\]' protocols are supported and they should
    /// be specified in the provided `conn_str`. For more flexibility consider
    /// creating the client using [`jsonrpsee`] directly.
    pub async fn new(conn_str: &str) -> Result<Self, Error> {
        let protocol = conn_str.split_once(':').map(|(proto, _)| proto);
        let client = match protocol {
            Some("http") | Some("https") => {
                Client::Http(HttpClientBuilder::default().build(conn_str)?)
            }
            Some("ws") | Some("wss") => {
                Client::Ws(WsClientBuilder::default().build(conn_str).await?)
            }
            _ => return Err(Error::ProtocolNotSupported(conn_str.into())),
        };

        Ok(client)
    }
}

impl ClientT for Client {
    async fn notification<Params>(&self, method: &str, params: Params) -> Result<(), ClientError>
    where
        Params: ToRpcParams + Send,
    {
        match self {
            Client::Http(client) => client.notification(method, params).await,
            Client::Ws(client) => client.notification(method, params).await,
        }
    }

    async fn request<R, Params>(&self, method: &str, params: Params) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
        Params: ToRpcParams + Send,
    {
        match self {
            Client::Http(client) => client.request(method, params).await,
            Client::Ws(client) => client.request(method, params).await,
        }
    }

    async fn batch_request<'a, R>(
        &self,
        batch: BatchRequestBuilder<'a>,
    ) -> Result<BatchResponse<'a, R>, ClientError>
    where
        R: DeserializeOwned + fmt::Debug + 'a,
    {
        match self {
            Client::Http(client) => client.batch_request(batch).await,
            Client::Ws(client) => client.batch_request(batch).await,
        }
    }
}
