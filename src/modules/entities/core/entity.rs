// Remote-backed entity with optimistic local edits.
//
// Purpose
// - Hold the last-known server state (`saved`) and local edits (`unsaved`) of one record.
// - Persist through the Gateway port and notify subscribers on every change.
//
// Invariants
// - A key in `unsaved` always differs from the same key in `saved`.
// - `id` is read from `saved` only. Local edits never change identity.
// - State is replaced only after a gateway call succeeds; a failed call leaves it untouched.
//
// Concurrency
// - Gateway calls are the only suspension points. Nothing is retried and nothing is cancelled.
//   Two saves racing on the same record are last-write-wins.

use crate::modules::entities::core::errors::ModelError;
use crate::modules::entities::core::model::{Attributes, Model, text};
use crate::modules::entities::core::observers::{Observers, Subscription};
use crate::shared::infrastructure::gateway::{Gateway, TransportError};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

pub struct Entity<M: Model> {
    gateway: Arc<dyn Gateway>,
    saved: Attributes,
    unsaved: Attributes,
    observers: Observers,
    model: PhantomData<M>,
}

/// Pulls the attribute mapping out of a `{"data": {...}}` response body.
pub(crate) fn entity_data(body: Value) -> Result<Attributes, TransportError> {
    match body {
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Object(data)) => Ok(data),
            _ => Err(TransportError::MalformedResponse(
                "response has no data object".into(),
            )),
        },
        _ => Err(TransportError::MalformedResponse(
            "response is not an object".into(),
        )),
    }
}

impl<M: Model> Entity<M> {
    /// A new entity with default attributes and no id.
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self::with_saved(gateway, None)
    }

    /// An existing entity built from a fetched payload.
    pub fn from_data(gateway: Arc<dyn Gateway>, data: Attributes) -> Self {
        Self::with_saved(gateway, Some(data))
    }

    fn with_saved(gateway: Arc<dyn Gateway>, data: Option<Attributes>) -> Self {
        Self {
            gateway,
            saved: merged_with_defaults::<M>(data),
            unsaved: Attributes::new(),
            observers: Observers::new(),
            model: PhantomData,
        }
    }

    /// Loads the entity with `id` from the gateway.
    pub async fn get_by_id(
        gateway: Arc<dyn Gateway>,
        id: impl Into<Value>,
    ) -> Result<Self, ModelError> {
        let mut data = Attributes::new();
        data.insert(M::ID_KEY.to_string(), id.into());
        let mut entity = Self::from_data(gateway, data);
        entity.refresh().await?;
        Ok(entity)
    }

    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.observers.subscribe(callback)
    }

    pub fn notify(&self) {
        self.observers.notify();
    }

    pub fn reset(&mut self, data: Option<Attributes>) {
        self.saved = merged_with_defaults::<M>(data);
        self.unsaved.clear();
        self.notify();
    }

    /// The saved id. `null`, `""`, `0` and `false` all mean the record was never created.
    pub fn id(&self) -> Option<&Value> {
        match self.saved.get(M::ID_KEY) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
            Some(id) => Some(id),
        }
    }

    /// Local edit if any, else the saved value, else the declared default.
    pub fn get(&self, key: &str) -> Value {
        self.unsaved
            .get(key)
            .or_else(|| self.saved.get(key))
            .cloned()
            .or_else(|| M::defaults().remove(key))
            .unwrap_or(Value::Null)
    }

    pub fn get_text(&self, key: &str) -> String {
        text(&self.get(key))
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<(), ModelError> {
        if !M::defaults().contains_key(key) {
            return Err(ModelError::UnknownAttribute {
                model: M::NAME,
                key: key.to_string(),
            });
        }
        self.write(key, value.into());
        Ok(())
    }

    /// Setter for declared attributes; concrete accessors go through here.
    pub(crate) fn write(&mut self, key: &str, value: Value) {
        if self.saved.get(key) == Some(&value) {
            self.unsaved.remove(key);
        } else {
            self.unsaved.insert(key.to_string(), value);
        }
        self.notify();
    }

    pub fn saved(&self) -> &Attributes {
        &self.saved
    }

    pub fn unsaved(&self) -> &Attributes {
        &self.unsaved
    }

    pub fn is_unsaved(&self) -> bool {
        self.id().is_none() || self.is_dirty()
    }

    pub fn is_dirty(&self) -> bool {
        !self.unsaved.is_empty()
    }

    pub fn is_dirty_key(&self, key: &str) -> bool {
        self.unsaved.contains_key(key)
    }

    pub fn delete_confirm_message(&self) -> String {
        M::delete_confirm_message(self)
    }

    fn item_url(&self) -> Option<String> {
        self.id().map(|id| format!("{}/{}", M::ROOT, text(id)))
    }

    /// Deletes the entity on the server. Without an id there is nothing to delete.
    pub async fn del(&self) -> Result<(), ModelError> {
        let Some(url) = self.item_url() else {
            return Ok(());
        };
        self.gateway.del(&url).await?;
        tracing::info!(model = M::NAME, %url, "deleted");
        Ok(())
    }

    pub async fn refresh(&mut self) -> Result<(), ModelError> {
        let url = self
            .item_url()
            .ok_or(ModelError::Precondition { operation: "refresh" })?;
        let body = self.gateway.get(&url, &[]).await?;
        self.replace_saved(entity_data(body)?);
        Ok(())
    }

    /// Creates the entity when it has no id, updates it otherwise.
    pub async fn save(&mut self) -> Result<(), ModelError> {
        let mut payload = self.saved.clone();
        payload.extend(self.unsaved.clone());
        let payload = Value::Object(payload);

        let body = match self.item_url() {
            Some(url) => self.gateway.put(&url, &payload).await?,
            None => self.gateway.post(M::ROOT, &payload).await?,
        };
        self.replace_saved(entity_data(body)?);
        tracing::info!(model = M::NAME, id = ?self.id(), "saved");
        Ok(())
    }

    fn replace_saved(&mut self, data: Attributes) {
        self.saved = data;
        self.unsaved.clear();
        self.notify();
    }
}

fn merged_with_defaults<M: Model>(data: Option<Attributes>) -> Attributes {
    let mut saved = M::defaults();
    if let Some(data) = data {
        saved.extend(data);
    }
    saved
}

#[cfg(test)]
mod entity_tests {
    use super::*;
    use crate::shared::infrastructure::gateway::in_memory::{GatewayRequest, InMemoryGateway};
    use crate::tests::fixtures::gateway::make_gateway;
    use crate::tests::fixtures::models::{THING_ROOT, Thing};
    use async_trait::async_trait;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type BeforeEachReturn = (Arc<InMemoryGateway>, Thing);

    #[fixture]
    fn before_each() -> BeforeEachReturn {
        let gateway = Arc::new(make_gateway());
        let thing = Thing::new(gateway.clone());
        (gateway, thing)
    }

    fn saved_thing(gateway: Arc<InMemoryGateway>) -> Thing {
        let data = json!({"thing_id": 7, "name": "lathe", "size": 3});
        Thing::from_data(gateway, data.as_object().cloned().unwrap())
    }

    fn count_notifications(thing: &Thing) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let _subscription = thing.subscribe(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    #[rstest]
    fn it_should_start_without_id_and_with_defaults(before_each: BeforeEachReturn) {
        let (_, thing) = before_each;
        assert_eq!(thing.id(), None);
        assert_eq!(thing.get("name"), json!(""));
        assert_eq!(thing.get("size"), json!(0));
        assert!(thing.is_unsaved());
        assert!(!thing.is_dirty());
    }

    #[rstest]
    fn it_should_read_unsaved_before_saved_before_default(before_each: BeforeEachReturn) {
        let (gateway, _) = before_each;
        let mut thing = saved_thing(gateway);
        assert_eq!(thing.get("name"), json!("lathe"));

        thing.set("name", "mill").unwrap();
        assert_eq!(thing.get("name"), json!("mill"));
        assert_eq!(thing.saved()["name"], json!("lathe"));
        assert_eq!(thing.get("missing"), Value::Null);
    }

    #[rstest]
    fn it_should_become_clean_when_set_back_to_the_saved_value(before_each: BeforeEachReturn) {
        let (gateway, _) = before_each;
        let mut thing = saved_thing(gateway);

        thing.set("size", 4).unwrap();
        assert!(thing.is_dirty());
        assert!(thing.is_dirty_key("size"));
        assert!(!thing.is_dirty_key("name"));
        assert!(thing.is_unsaved());

        thing.set("size", 3).unwrap();
        assert!(!thing.is_dirty());
        assert!(!thing.is_unsaved());
        assert!(thing.unsaved().is_empty());
    }

    #[rstest]
    fn it_should_notify_on_every_set_even_when_value_is_unchanged(before_each: BeforeEachReturn) {
        let (gateway, _) = before_each;
        let mut thing = saved_thing(gateway);
        let count = count_notifications(&thing);

        thing.set("name", "lathe").unwrap();
        thing.set("name", "mill").unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[rstest]
    fn it_should_reject_undeclared_attributes(before_each: BeforeEachReturn) {
        let (_, mut thing) = before_each;
        let result = thing.set("colour", "red");
        assert_eq!(
            result,
            Err(ModelError::UnknownAttribute {
                model: "Thing",
                key: "colour".to_string()
            })
        );
        assert!(!thing.is_dirty());
    }

    #[rstest]
    fn it_should_reset_to_defaults_merged_with_data(before_each: BeforeEachReturn) {
        let (gateway, _) = before_each;
        let mut thing = saved_thing(gateway);
        thing.set("name", "mill").unwrap();
        let count = count_notifications(&thing);

        thing.reset(json!({"thing_id": 8}).as_object().cloned());
        assert_eq!(thing.id(), Some(&json!(8)));
        assert_eq!(thing.get("name"), json!(""));
        assert!(!thing.is_dirty());

        thing.reset(None);
        assert_eq!(thing.id(), None);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[rstest]
    fn it_should_invoke_the_subscriber_before_subscribe_returns(before_each: BeforeEachReturn) {
        let (_, thing) = before_each;
        let count = count_notifications(&thing);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn it_should_stop_notifying_after_unsubscribe(before_each: BeforeEachReturn) {
        let (_, mut thing) = before_each;
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let subscription = thing.subscribe(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        subscription.unsubscribe();
        subscription.unsubscribe();
        thing.set("name", "drill").unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!(""))]
    #[case(json!(0))]
    #[case(json!(0.0))]
    #[case(json!(false))]
    fn it_should_treat_empty_ids_as_absent(before_each: BeforeEachReturn, #[case] id: Value) {
        let (gateway, _) = before_each;
        let data = json!({ "thing_id": id });
        let thing = Thing::from_data(gateway, data.as_object().cloned().unwrap());
        assert_eq!(thing.id(), None);
        assert!(thing.is_unsaved());
    }

    #[rstest]
    #[case(json!(7))]
    #[case(json!("0"))]
    #[case(json!("abc"))]
    fn it_should_accept_other_ids(before_each: BeforeEachReturn, #[case] id: Value) {
        let (gateway, _) = before_each;
        let data = json!({ "thing_id": id.clone() });
        let thing = Thing::from_data(gateway, data.as_object().cloned().unwrap());
        assert_eq!(thing.id(), Some(&id));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_delete_without_network_when_there_is_no_id(before_each: BeforeEachReturn) {
        let (gateway, thing) = before_each;
        thing.del().await.expect("delete without id should succeed");
        assert!(gateway.requests().await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_refresh_when_there_is_no_id(before_each: BeforeEachReturn) {
        let (gateway, mut thing) = before_each;
        let result = thing.refresh().await;
        assert_eq!(result, Err(ModelError::Precondition { operation: "refresh" }));
        assert_eq!(result.unwrap_err().to_string(), "refresh requires id");
        assert!(gateway.requests().await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_create_a_new_entity_on_save(before_each: BeforeEachReturn) {
        let (gateway, mut thing) = before_each;
        thing.set("name", "bandsaw").unwrap();
        let count = count_notifications(&thing);

        thing.save().await.expect("save failed");

        assert_eq!(thing.id(), Some(&json!(1)));
        assert!(!thing.is_unsaved());
        assert_eq!(thing.get("name"), json!("bandsaw"));
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(
            gateway.requests().await,
            vec![GatewayRequest::Post {
                url: THING_ROOT.to_string(),
                data: json!({"name": "bandsaw", "size": 0}),
            }]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_update_an_existing_entity_with_the_merged_payload() {
        let mut gateway = make_gateway();
        let id = gateway.seed(THING_ROOT, json!({"name": "lathe", "size": 3})).unwrap();
        let gateway = Arc::new(gateway);
        let mut thing = Thing::get_by_id(gateway.clone(), id).await.unwrap();

        thing.set("size", 5).unwrap();
        thing.save().await.expect("save failed");

        assert!(!thing.is_dirty());
        assert_eq!(thing.get("size"), json!(5));
        let requests = gateway.requests().await;
        assert_eq!(
            requests.last(),
            Some(&GatewayRequest::Put {
                url: format!("{THING_ROOT}/{id}"),
                data: json!({"thing_id": id, "name": "lathe", "size": 5}),
            })
        );
        assert_eq!(gateway.rows(THING_ROOT).await[0]["size"], json!(5));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_leave_state_unchanged_when_save_fails() {
        let mut gateway = make_gateway();
        gateway.toggle_offline();
        let gateway = Arc::new(gateway);
        let mut thing = saved_thing(gateway);
        thing.set("name", "mill").unwrap();

        let result = thing.save().await;

        assert!(matches!(
            result,
            Err(ModelError::Transport(TransportError::Connection(_)))
        ));
        assert_eq!(thing.saved()["name"], json!("lathe"));
        assert_eq!(thing.get("name"), json!("mill"));
        assert!(thing.is_dirty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refresh_saved_state_and_drop_local_edits() {
        let mut gateway = make_gateway();
        let id = gateway.seed(THING_ROOT, json!({"name": "lathe", "size": 3})).unwrap();
        let gateway = Arc::new(gateway);
        let data = json!({"thing_id": id});
        let mut thing = Thing::from_data(gateway, data.as_object().cloned().unwrap());
        thing.set("name", "mill").unwrap();

        thing.refresh().await.expect("refresh failed");

        assert_eq!(thing.get("name"), json!("lathe"));
        assert!(!thing.is_dirty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_delete_an_existing_entity() {
        let mut gateway = make_gateway();
        let id = gateway.seed(THING_ROOT, json!({"name": "lathe"})).unwrap();
        let gateway = Arc::new(gateway);
        let thing = Thing::get_by_id(gateway.clone(), id).await.unwrap();

        thing.del().await.expect("delete failed");

        assert!(gateway.rows(THING_ROOT).await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_propagate_delete_errors_verbatim(before_each: BeforeEachReturn) {
        let (gateway, _) = before_each;
        let thing = saved_thing(gateway);
        let result = thing.del().await;
        assert_eq!(
            result,
            Err(ModelError::Transport(TransportError::not_found(&format!(
                "{THING_ROOT}/7"
            ))))
        );
    }

    struct NoDataGateway;

    #[async_trait]
    impl Gateway for NoDataGateway {
        async fn get(&self, _: &str, _: &[(String, String)]) -> Result<Value, TransportError> {
            Ok(json!({"status": "ok"}))
        }
        async fn post(&self, _: &str, _: &Value) -> Result<Value, TransportError> {
            Ok(json!([]))
        }
        async fn put(&self, _: &str, _: &Value) -> Result<Value, TransportError> {
            Ok(Value::Null)
        }
        async fn del(&self, _: &str) -> Result<Value, TransportError> {
            Ok(Value::Null)
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_responses_without_a_data_object() {
        let mut thing = Thing::new(Arc::new(NoDataGateway));
        thing.set("name", "mill").unwrap();

        let result = thing.save().await;

        assert!(matches!(
            result,
            Err(ModelError::Transport(TransportError::MalformedResponse(_)))
        ));
        assert!(thing.is_dirty());
        assert_eq!(
            Thing::get_by_id(Arc::new(NoDataGateway), 1).await.err(),
            Some(ModelError::Transport(TransportError::MalformedResponse(
                "response has no data object".to_string()
            )))
        );
    }

    #[rstest]
    fn it_should_delegate_the_confirm_message_to_the_model(before_each: BeforeEachReturn) {
        let (gateway, _) = before_each;
        let thing = saved_thing(gateway);
        assert_eq!(thing.delete_confirm_message(), "Delete thing lathe?");
    }
}
