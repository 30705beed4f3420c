//! Async HTTP client wrapping the rollcall JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response};
use rollcall_core::materia::{Materia, MateriaInput};
use uuid::Uuid;

/// The four store calls the form drives.
///
/// Mutations only report success: the client re-fetches the full list
/// afterwards instead of trusting response bodies.
#[allow(async_fn_in_trait)]
pub trait Backend {
  async fn list_materias(&self) -> Result<Vec<Materia>>;
  async fn create_materia(&self, input: &MateriaInput) -> Result<()>;
  async fn update_materia(&self, id: Uuid, input: &MateriaInput) -> Result<()>;
  async fn delete_materia(&self, id: Uuid) -> Result<()>;
}

/// Connection settings for the rollcall API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub timeout:  Duration,
}

/// Async HTTP client for the rollcall JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }
}

/// Turn a non-2xx response into an error naming the request.
fn ensure_success(resp: Response, what: &str) -> Result<Response> {
  if resp.status().is_success() {
    Ok(resp)
  } else {
    Err(anyhow!("{what} → {}", resp.status()))
  }
}

impl Backend for ApiClient {
  /// `GET /materias`
  async fn list_materias(&self) -> Result<Vec<Materia>> {
    let resp = self
      .client
      .get(self.url("/materias"))
      .send()
      .await
      .context("GET /materias failed")?;
    ensure_success(resp, "GET /materias")?
      .json()
      .await
      .context("deserialising materias")
  }

  /// `POST /materias`
  async fn create_materia(&self, input: &MateriaInput) -> Result<()> {
    let resp = self
      .client
      .post(self.url("/materias"))
      .json(input)
      .send()
      .await
      .context("POST /materias failed")?;
    ensure_success(resp, "POST /materias")?;
    Ok(())
  }

  /// `PUT /materias/:id`
  async fn update_materia(&self, id: Uuid, input: &MateriaInput) -> Result<()> {
    let resp = self
      .client
      .put(self.url(&format!("/materias/{id}")))
      .json(input)
      .send()
      .await
      .with_context(|| format!("PUT /materias/{id} failed"))?;
    ensure_success(resp, &format!("PUT /materias/{id}"))?;
    Ok(())
  }

  /// `DELETE /materias/:id`
  async fn delete_materia(&self, id: Uuid) -> Result<()> {
    let resp = self
      .client
      .delete(self.url(&format!("/materias/{id}")))
      .send()
      .await
      .with_context(|| format!("DELETE /materias/{id} failed"))?;
    ensure_success(resp, &format!("DELETE /materias/{id}"))?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use rollcall_store_sqlite::SqliteStore;

  use super::*;

  /// Serve the real router over an in-memory store on an ephemeral port.
  async fn spawn_server() -> ApiClient {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, rollcall_api::api_router(store))
        .await
        .unwrap();
    });

    ApiClient::new(ApiConfig {
      base_url: format!("http://{addr}"),
      timeout:  Duration::from_secs(5),
    })
    .unwrap()
  }

  fn calculus(faltas: i64) -> MateriaInput {
    MateriaInput {
      materia:   "Calculus".into(),
      professor: "Dr. A".into(),
      semestre:  1,
      faltas,
    }
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn crud_over_http() {
    let client = spawn_server().await;

    client.create_materia(&calculus(0)).await.unwrap();
    let listed = client.list_materias().await.unwrap();
    assert_eq!(listed.len(), 1);
    let id = listed[0].id;

    client.update_materia(id, &calculus(5)).await.unwrap();
    let listed = client.list_materias().await.unwrap();
    assert_eq!(listed[0].faltas, 5);
    assert_eq!(listed[0].id, id);

    client.delete_materia(id).await.unwrap();
    let err = client.delete_materia(id).await.unwrap_err();
    assert!(format!("{err:#}").contains("404"), "{err:#}");

    let err = client
      .update_materia(Uuid::new_v4(), &calculus(1))
      .await
      .unwrap_err();
    assert!(format!("{err:#}").contains("404"), "{err:#}");

    assert!(client.list_materias().await.unwrap().is_empty());
  }

  #[test]
  fn url_joins_without_double_slash() {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://localhost:3000/".into(),
      timeout:  Duration::from_secs(1),
    })
    .unwrap();
    assert_eq!(client.url("/materias"), "http://localhost:3000/materias");
  }
}
