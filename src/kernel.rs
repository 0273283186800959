//! Client for the kernel's HTTP API.
//!
//! The [`Kernel`] trait models the surface the navigation pipeline consumes:
//! structured SQL queries, document creation, notebook listing and
//! configuration, Sprig template rendering, attribute upserts, document
//! surfacing and user notifications. [`HttpKernel`] is the production
//! implementation speaking the kernel's `{code, msg, data}` JSON protocol.

use std::collections::HashMap;
use std::process::{Command, Stdio};

use async_trait::async_trait;
use log::{debug, info, trace};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use shell_words::split;

use crate::{DailyNavError, NotebookConfEnvelope, NotebookDescriptor, Result};

/// A single result row from a structured query.
pub type Row = serde_json::Map<String, Value>;

/// The capabilities the navigation pipeline consumes from the kernel.
#[async_trait]
pub trait Kernel: Send + Sync {
    /// Executes a SQL query and returns the result rows in kernel order.
    async fn sql(&self, stmt: &str) -> Result<Vec<Row>>;

    /// Creates a document with markdown content, returning its ID.
    async fn create_doc_with_md(
        &self,
        notebook: &str,
        path: &str,
        markdown: &str,
    ) -> Result<String>;

    /// Lists all notebooks in kernel order.
    async fn ls_notebooks(&self) -> Result<Vec<NotebookDescriptor>>;

    /// Retrieves a notebook's configuration.
    async fn notebook_conf(&self, notebook: &str) -> Result<NotebookConfEnvelope>;

    /// Renders a Sprig template.
    async fn render_sprig(&self, template: &str) -> Result<String>;

    /// Upserts custom attributes on a block.
    async fn set_block_attrs(&self, id: &str, attrs: HashMap<String, String>) -> Result<()>;

    /// Brings a document into focus in the editor. Fire-and-forget.
    async fn open_doc(&self, id: &str) -> Result<()>;

    /// Shows a transient message to the user.
    async fn push_msg(&self, msg: &str) -> Result<()>;

    /// Shows an error message to the user, persistent until dismissed.
    async fn push_err_msg(&self, msg: &str) -> Result<()>;
}

/// The kernel's standard response envelope.
#[derive(Debug, Deserialize)]
struct KernelReply {
    code: i64,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Value,
}

/// HTTP implementation of [`Kernel`].
pub struct HttpKernel {
    client: Client,
    base_url: String,
    token: Option<String>,
    opener_command: String,
}

impl HttpKernel {
    pub fn new(base_url: &str, token: Option<String>, opener_command: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            opener_command,
        }
    }

    /// Posts a JSON payload to an `/api/...` endpoint and unwraps the
    /// `{code, msg, data}` envelope.
    async fn post(&self, endpoint: &str, payload: Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        trace!("POST {}", url);

        let mut request = self.client.post(&url).json(&payload);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Token {}", token));
        }

        let reply: KernelReply = request.send().await?.error_for_status()?.json().await?;

        if reply.code != 0 {
            return Err(DailyNavError::Api {
                code: reply.code,
                message: reply.msg,
            });
        }

        Ok(reply.data)
    }
}

#[async_trait]
impl Kernel for HttpKernel {
    async fn sql(&self, stmt: &str) -> Result<Vec<Row>> {
        debug!("Executing kernel query: {}", stmt);
        let data = self.post("/api/query/sql", json!({ "stmt": stmt })).await?;

        match data {
            Value::Array(rows) => Ok(rows
                .into_iter()
                .filter_map(|row| match row {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect()),
            Value::Null => Ok(Vec::new()),
            other => Err(DailyNavError::Api {
                code: 0,
                message: format!("Unexpected query result shape: {}", other),
            }),
        }
    }

    async fn create_doc_with_md(
        &self,
        notebook: &str,
        path: &str,
        markdown: &str,
    ) -> Result<String> {
        info!("Creating document at {} in notebook {}", path, notebook);
        let data = self
            .post(
                "/api/filetree/createDocWithMd",
                json!({
                    "notebook": notebook,
                    "path": path,
                    "markdown": markdown,
                }),
            )
            .await?;

        Ok(data.as_str().unwrap_or_default().to_string())
    }

    async fn ls_notebooks(&self) -> Result<Vec<NotebookDescriptor>> {
        let data = self.post("/api/notebook/lsNotebooks", json!({})).await?;

        let notebooks = data
            .get("notebooks")
            .cloned()
            .unwrap_or(Value::Array(Vec::new()));

        Ok(serde_json::from_value(notebooks)?)
    }

    async fn notebook_conf(&self, notebook: &str) -> Result<NotebookConfEnvelope> {
        let data = self
            .post(
                "/api/notebook/getNotebookConf",
                json!({ "notebook": notebook }),
            )
            .await?;

        serde_json::from_value(data).map_err(|_| DailyNavError::NotebookConfigUnavailable {
            notebook: notebook.to_string(),
        })
    }

    async fn render_sprig(&self, template: &str) -> Result<String> {
        let data = self
            .post("/api/template/renderSprig", json!({ "template": template }))
            .await?;

        Ok(data.as_str().unwrap_or_default().to_string())
    }

    async fn set_block_attrs(&self, id: &str, attrs: HashMap<String, String>) -> Result<()> {
        self.post(
            "/api/attr/setBlockAttrs",
            json!({ "id": id, "attrs": attrs }),
        )
        .await?;

        Ok(())
    }

    async fn open_doc(&self, id: &str) -> Result<()> {
        let link = format!("siyuan://blocks/{}", id);
        info!("Opening {} via system opener", link);

        let mut args = split(&self.opener_command).map_err(|e| DailyNavError::OpenerError {
            message: format!("Failed to parse opener command: {}", e),
        })?;

        if args.is_empty() {
            return Err(DailyNavError::OpenerError {
                message: "Empty opener command".to_string(),
            });
        }

        args.push(link);

        Command::new(&args[0])
            .args(&args[1..])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| DailyNavError::OpenerError {
                message: format!("Failed to launch opener {}: {}", args[0], e),
            })?;

        Ok(())
    }

    async fn push_msg(&self, msg: &str) -> Result<()> {
        self.post(
            "/api/notification/pushMsg",
            json!({ "msg": msg, "timeout": 7000 }),
        )
        .await?;

        Ok(())
    }

    async fn push_err_msg(&self, msg: &str) -> Result<()> {
        // timeout 0 keeps the message up until the user dismisses it
        self.post(
            "/api/notification/pushErrMsg",
            json!({ "msg": msg, "timeout": 0 }),
        )
        .await?;

        Ok(())
    }
}
