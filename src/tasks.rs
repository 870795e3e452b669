//! Async task management for non-blocking API operations.
//!
//! Network calls run on background tokio tasks so the UI stays responsive.
//! Each task reports back through an unbounded channel that the main loop
//! drains with `try_recv()` between frames.
//!
//! There is no cancellation and no de-duplication: every paid toggle issues
//! its own request, and overlapping requests may resolve in any order.

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{Activity, ActivityUpdate, ApiClient};
use crate::app::Effect;

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// Activity list fetched (initial load or refresh).
    ActivitiesFetched(Result<Vec<Activity>, String>),

    /// A paid-flag update finished.
    PaidUpdated {
        id: String,
        paid: bool,
        generation: u64,
        result: Result<(), String>,
    },

    /// A ticket field save finished.
    ActivitySaved {
        id: String,
        result: Result<(), String>,
    },
}

/// Spawns background tasks for API calls.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
    client: ApiClient,
}

impl TaskSpawner {
    /// Create a spawner that issues requests through `client`.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>, client: ApiClient) -> Self {
        Self { tx, client }
    }

    /// Start the background work for a controller effect.
    pub fn dispatch(&self, effect: Effect) {
        debug!(?effect, "Dispatching effect");
        match effect {
            Effect::FetchActivities => self.spawn_fetch_activities(),
            Effect::UpdatePaid {
                id,
                paid,
                generation,
            } => self.spawn_update_paid(id, paid, generation),
            Effect::SaveActivity { id, update } => self.spawn_save_activity(id, update),
        }
    }

    /// Spawn a task to fetch all activities.
    pub fn spawn_fetch_activities(&self) {
        let tx = self.tx.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = client.list_activities().await.map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage::ActivitiesFetched(result));
        });
    }

    /// Spawn a task to set the paid flag of an activity.
    pub fn spawn_update_paid(&self, id: String, paid: bool, generation: u64) {
        let tx = self.tx.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = client
                .update_paid(&id, paid)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage::PaidUpdated {
                id,
                paid,
                generation,
                result,
            });
        });
    }

    /// Spawn a task to persist edited ticket fields.
    pub fn spawn_save_activity(&self, id: String, update: ActivityUpdate) {
        let tx = self.tx.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = client
                .update_activity(&id, &update)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage::ActivitySaved { id, result });
        });
    }
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner). The receiver should be polled in
/// the main event loop.
pub fn create_task_channel(client: ApiClient) -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx, client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup(server: &MockServer) -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
        let client = ApiClient::new(&server.uri(), Duration::from_secs(5))
            .unwrap()
            .with_retry_delay(Duration::from_millis(1));
        create_task_channel(client)
    }

    #[tokio::test]
    async fn test_dispatch_update_paid_success() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/client-activity/update/a1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let (mut rx, spawner) = setup(&server).await;
        spawner.dispatch(Effect::UpdatePaid {
            id: "a1".to_string(),
            paid: true,
            generation: 4,
        });

        match rx.recv().await {
            Some(ApiMessage::PaidUpdated {
                id,
                paid,
                generation,
                result,
            }) => {
                assert_eq!(id, "a1");
                assert!(paid);
                assert_eq!(generation, 4);
                tokio_test::assert_ok!(result);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dispatch_update_paid_failure() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (mut rx, spawner) = setup(&server).await;
        spawner.spawn_update_paid("a1".to_string(), false, 1);

        match rx.recv().await {
            Some(ApiMessage::PaidUpdated { result, .. }) => {
                tokio_test::assert_err!(result);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dispatch_fetch_activities() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/client-activity"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{ "id": "a1", "paid": true }])),
            )
            .mount(&server)
            .await;

        let (mut rx, spawner) = setup(&server).await;
        spawner.dispatch(Effect::FetchActivities);

        match rx.recv().await {
            Some(ApiMessage::ActivitiesFetched(Ok(activities))) => {
                assert_eq!(activities.len(), 1);
                assert!(activities[0].paid);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dispatch_save_activity() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/client-activity/update/t2"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (mut rx, spawner) = setup(&server).await;
        spawner.dispatch(Effect::SaveActivity {
            id: "t2".to_string(),
            update: ActivityUpdate {
                response: Some("ok".to_string()),
                inside_info: None,
            },
        });

        match rx.recv().await {
            Some(ApiMessage::ActivitySaved { id, result }) => {
                assert_eq!(id, "t2");
                assert!(result.is_ok());
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
