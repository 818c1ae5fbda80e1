//! Stateful to-do list client.
//!
//! # Design
//! `TodoListClient` owns a [`TodoListState`] and a stateless [`TodoListApi`].
//! Every operation comes in two halves: `begin_*` checks the guards, raises
//! the loading flag and returns the request to send; `finish_*` takes the
//! outcome of that request and applies the matching [`Transition`]. A host
//! that can block on I/O uses the one-shot wrappers (`fetch_list`,
//! `toggle_item`, ...) with a [`Transport`]; a host that wants several
//! requests in flight calls the halves itself.

use crate::api::TodoListApi;
use crate::error::{ApiError, ClientError};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::loading::Operation;
use crate::state::{TodoListState, Transition};
use crate::types::{CreateTodoItem, Place};

/// Outcome of executing a request: a response, or no response at all.
pub type Outcome = Result<HttpResponse, ApiError>;

#[derive(Debug, Clone)]
pub struct TodoListClient {
    api: TodoListApi,
    state: TodoListState,
}

impl TodoListClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            api: TodoListApi::new(base_url),
            state: TodoListState::new(),
        }
    }

    pub fn api(&self) -> &TodoListApi {
        &self.api
    }

    pub fn state(&self) -> &TodoListState {
        &self.state
    }

    /// Edit the draft title. Returns `false` if the edit was ignored because
    /// a submission is in flight.
    pub fn set_draft_title(&mut self, title: impl Into<String>) -> bool {
        let accepted = self.state.set_draft_title(title);
        if !accepted {
            tracing::debug!("draft edit ignored during submission");
        }
        accepted
    }

    pub fn set_place(&mut self, place: Place) {
        self.state.set_place(Some(place));
    }

    pub fn clear_place(&mut self) {
        self.state.set_place(None);
    }

    fn acquire(&mut self, op: Operation) -> Result<(), ClientError> {
        if !self.state.begin(&op) {
            tracing::debug!(%op, "rejected, already in flight");
            return Err(ClientError::Busy(op));
        }
        Ok(())
    }

    fn ensure_known(&self, id: &str) -> Result<(), ClientError> {
        match self.state.item(id) {
            Some(_) => Ok(()),
            None => Err(ClientError::UnknownItem(id.to_string())),
        }
    }

    /// Apply `outcome` for `op`, turning success into `transition` and any
    /// failure into `Transition::Failed`. An outcome for an operation that
    /// was never begun (or already settled) is refused and changes nothing.
    fn settle<T>(
        &mut self,
        op: Operation,
        outcome: Result<T, ApiError>,
        transition: impl FnOnce(T) -> Transition,
    ) -> Result<(), ClientError> {
        if !self.state.loading().is_held(&op) {
            tracing::debug!(%op, "outcome ignored, not in flight");
            return Err(ClientError::NotInFlight(op));
        }
        let state = std::mem::take(&mut self.state);
        match outcome {
            Ok(value) => {
                tracing::info!(%op, "confirmed by server");
                self.state = state.apply(transition(value));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%op, error = %err, "request failed");
                self.state = state.apply(Transition::Failed {
                    op,
                    message: err.to_string(),
                });
                Err(ClientError::Api(err))
            }
        }
    }

    pub fn begin_fetch_list(&mut self) -> Result<HttpRequest, ClientError> {
        self.acquire(Operation::FetchList)?;
        let request = self.api.build_list();
        tracing::debug!(url = %request.path, "fetching list");
        Ok(request)
    }

    pub fn finish_fetch_list(&mut self, outcome: Outcome) -> Result<(), ClientError> {
        let parsed = outcome.and_then(|response| self.api.parse_list(response));
        self.settle(Operation::FetchList, parsed, Transition::FetchSucceeded)
    }

    /// Start submitting the current draft. An empty draft is rejected before
    /// any flag is raised. The selected place is display-only and not sent.
    pub fn begin_submit(&mut self) -> Result<HttpRequest, ClientError> {
        if self.state.draft_title().is_empty() {
            return Err(ClientError::EmptyTitle);
        }
        let input = CreateTodoItem {
            title: self.state.draft_title().to_string(),
        };
        let request = self.api.build_create(&input)?;
        self.acquire(Operation::Submit)?;
        tracing::debug!(title = %input.title, "submitting new item");
        Ok(request)
    }

    pub fn finish_submit(&mut self, outcome: Outcome) -> Result<(), ClientError> {
        let parsed = outcome.and_then(|response| self.api.parse_create(response));
        self.settle(Operation::Submit, parsed, Transition::CreateSucceeded)
    }

    pub fn begin_delete(&mut self, id: &str) -> Result<HttpRequest, ClientError> {
        self.ensure_known(id)?;
        self.acquire(Operation::Delete(id.to_string()))?;
        tracing::debug!(id, "deleting item");
        Ok(self.api.build_delete(id))
    }

    pub fn finish_delete(&mut self, id: &str, outcome: Outcome) -> Result<(), ClientError> {
        let parsed = outcome.and_then(|response| self.api.parse_delete(response));
        let id = id.to_string();
        self.settle(Operation::Delete(id.clone()), parsed, |()| {
            Transition::DeleteSucceeded(id)
        })
    }

    pub fn begin_toggle(&mut self, id: &str) -> Result<HttpRequest, ClientError> {
        self.ensure_known(id)?;
        self.acquire(Operation::Toggle(id.to_string()))?;
        tracing::debug!(id, "toggling item");
        Ok(self.api.build_toggle(id))
    }

    pub fn finish_toggle(&mut self, id: &str, outcome: Outcome) -> Result<(), ClientError> {
        let parsed = outcome.and_then(|response| self.api.parse_toggle(response));
        let id = id.to_string();
        self.settle(Operation::Toggle(id.clone()), parsed, |()| {
            Transition::ToggleSucceeded(id)
        })
    }

    pub fn fetch_list(&mut self, transport: &impl Transport) -> Result<(), ClientError> {
        let request = self.begin_fetch_list()?;
        self.finish_fetch_list(transport.execute(&request))
    }

    /// Submit the current draft, as pressing Enter in the input does.
    pub fn submit_new_item(&mut self, transport: &impl Transport) -> Result<(), ClientError> {
        let request = self.begin_submit()?;
        self.finish_submit(transport.execute(&request))
    }

    pub fn delete_item(&mut self, id: &str, transport: &impl Transport) -> Result<(), ClientError> {
        let request = self.begin_delete(id)?;
        self.finish_delete(id, transport.execute(&request))
    }

    pub fn toggle_item(&mut self, id: &str, transport: &impl Transport) -> Result<(), ClientError> {
        let request = self.begin_toggle(id)?;
        self.finish_toggle(id, transport.execute(&request))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::http::HttpMethod;
    use crate::types::TodoItem;

    /// Replays canned outcomes in order and records every request.
    #[derive(Default)]
    struct Scripted {
        outcomes: RefCell<VecDeque<Outcome>>,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Scripted {
        fn reply(self, status: u16, body: &str) -> Self {
            self.outcomes.borrow_mut().push_back(Ok(ok(status, body)));
            self
        }

        fn fail(self, message: &str) -> Self {
            self.outcomes
                .borrow_mut()
                .push_back(Err(ApiError::Transport(message.to_string())));
            self
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.seen.borrow().clone()
        }
    }

    impl Transport for Scripted {
        fn execute(&self, request: &HttpRequest) -> Outcome {
            self.seen.borrow_mut().push(request.clone());
            self.outcomes
                .borrow_mut()
                .pop_front()
                .expect("no scripted outcome left")
        }
    }

    fn ok(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn item(id: &str, title: &str, is_finish: bool) -> TodoItem {
        TodoItem {
            id: id.to_string(),
            title: title.to_string(),
            is_finish,
            place: None,
        }
    }

    fn client_with(body: &str) -> TodoListClient {
        let mut client = TodoListClient::new("http://api.test");
        let transport = Scripted::default().reply(200, body);
        client.fetch_list(&transport).unwrap();
        client
    }

    #[test]
    fn add_after_initial_fetch_appends() {
        let mut client = TodoListClient::new("http://api.test");
        let transport = Scripted::default()
            .reply(200, r#"[{"id":"1","title":"A","isFinish":false}]"#)
            .reply(201, r#"{"id":"2","title":"B","isFinish":false}"#);

        client.fetch_list(&transport).unwrap();
        assert!(client.set_draft_title("B"));
        client.submit_new_item(&transport).unwrap();

        assert_eq!(
            client.state().list(),
            &[item("1", "A", false), item("2", "B", false)]
        );
        assert_eq!(client.state().draft_title(), "");

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].path, "http://api.test/todo-list/");
        assert_eq!(requests[1].method, HttpMethod::Post);
        assert_eq!(requests[1].body.as_deref(), Some(r#"{"title":"B"}"#));
    }

    #[test]
    fn empty_draft_issues_no_request() {
        let mut client = TodoListClient::new("http://api.test");
        let transport = Scripted::default();
        assert_eq!(client.submit_new_item(&transport), Err(ClientError::EmptyTitle));
        assert!(transport.requests().is_empty());
        assert!(client.state().loading().is_idle());
    }

    #[test]
    fn whitespace_draft_is_submitted() {
        let mut client = TodoListClient::new("http://api.test");
        let transport = Scripted::default().reply(201, r#"{"id":"5","title":"   "}"#);
        client.set_draft_title("   ");
        client.submit_new_item(&transport).unwrap();
        assert_eq!(transport.requests()[0].body.as_deref(), Some(r#"{"title":"   "}"#));
        assert_eq!(client.state().list(), &[item("5", "   ", false)]);
    }

    #[test]
    fn only_one_submission_in_flight() {
        let mut client = TodoListClient::new("http://api.test");
        client.set_draft_title("Buy milk");
        let request = client.begin_submit().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert!(client.state().loading().is_input_loading());

        assert!(!client.set_draft_title("Buy oat milk"));
        assert_eq!(client.begin_submit(), Err(ClientError::Busy(Operation::Submit)));

        client
            .finish_submit(Ok(ok(201, r#"{"id":"42","title":"Buy milk","isFinish":false}"#)))
            .unwrap();
        assert_eq!(client.state().list(), &[item("42", "Buy milk", false)]);
        assert!(client.set_draft_title("next"));
    }

    #[test]
    fn selected_place_is_not_sent() {
        let mut client = TodoListClient::new("http://api.test");
        client.set_place(Place::home());
        client.set_draft_title("Water plants");
        let request = client.begin_submit().unwrap();
        let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "title": "Water plants" }));
        assert_eq!(client.state().place(), Some(&Place::home()));
    }

    #[test]
    fn delete_removes_item() {
        let mut client = client_with(
            r#"[{"id":"6","title":"F"},{"id":"7","title":"G"},{"id":"8","title":"H"}]"#,
        );
        let transport = Scripted::default().reply(204, "");
        client.delete_item("7", &transport).unwrap();
        let ids: Vec<&str> = client.state().list().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["6", "8"]);
        assert_eq!(transport.requests()[0].path, "http://api.test/todo-list/7");
    }

    #[test]
    fn toggle_flips_completion() {
        let mut client = client_with(r#"[{"id":"3","title":"C","isFinish":false},{"id":"4","title":"D"}]"#);
        let transport = Scripted::default().reply(200, "");
        client.toggle_item("3", &transport).unwrap();
        assert_eq!(
            client.state().list(),
            &[item("3", "C", true), item("4", "D", false)]
        );
        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Put);
        assert!(request.body.is_none());
    }

    #[test]
    fn toggles_on_different_items_overlap() {
        let mut client = client_with(r#"[{"id":"1","title":"A"},{"id":"2","title":"B"}]"#);
        client.begin_toggle("1").unwrap();
        client.begin_toggle("2").unwrap();
        assert!(client.state().loading().is_checkbox_loading("1"));
        assert!(client.state().loading().is_checkbox_loading("2"));

        client.finish_toggle("2", Ok(ok(200, ""))).unwrap();
        client.finish_toggle("1", Ok(ok(200, ""))).unwrap();
        assert!(client.state().list().iter().all(|i| i.is_finish));
        assert!(client.state().loading().is_idle());
    }

    #[test]
    fn same_item_double_toggle_is_rejected() {
        let mut client = client_with(r#"[{"id":"1","title":"A"}]"#);
        client.begin_toggle("1").unwrap();
        assert_eq!(
            client.begin_toggle("1"),
            Err(ClientError::Busy(Operation::Toggle("1".into())))
        );
        client.finish_toggle("1", Ok(ok(200, ""))).unwrap();
        assert!(client.state().item("1").unwrap().is_finish);
    }

    #[test]
    fn outcome_without_begin_is_refused() {
        let mut client = client_with(r#"[{"id":"3","title":"C"}]"#);
        client.begin_toggle("3").unwrap();
        client.finish_toggle("3", Ok(ok(200, ""))).unwrap();
        assert_eq!(
            client.finish_toggle("3", Ok(ok(200, ""))),
            Err(ClientError::NotInFlight(Operation::Toggle("3".into())))
        );
        assert!(client.state().item("3").unwrap().is_finish);

        assert_eq!(
            client.finish_delete("3", Ok(ok(204, ""))),
            Err(ClientError::NotInFlight(Operation::Delete("3".into())))
        );
        assert_eq!(
            client.finish_submit(Ok(ok(201, r#"{"id":"4","title":"D"}"#))),
            Err(ClientError::NotInFlight(Operation::Submit))
        );
        assert_eq!(client.state().list(), &[item("3", "C", true)]);
        assert!(client.state().last_error().is_none());
    }

    #[test]
    fn unknown_id_issues_no_request() {
        let mut client = client_with("[]");
        let transport = Scripted::default();
        assert_eq!(
            client.toggle_item("nope", &transport),
            Err(ClientError::UnknownItem("nope".into()))
        );
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn failed_fetch_clears_flag_and_reports() {
        let mut client = client_with(r#"[{"id":"1","title":"A"}]"#);
        let transport = Scripted::default().fail("connection refused");
        let err = client.fetch_list(&transport).unwrap_err();
        assert!(matches!(err, ClientError::Api(ApiError::Transport(_))));
        assert!(!client.state().loading().is_list_loading());
        assert_eq!(client.state().list().len(), 1);
        assert!(client.state().last_error().unwrap().contains("connection refused"));
    }

    #[test]
    fn failed_delete_keeps_item() {
        let mut client = client_with(r#"[{"id":"1","title":"A"}]"#);
        let transport = Scripted::default().reply(500, "boom");
        let err = client.delete_item("1", &transport).unwrap_err();
        assert!(matches!(err, ClientError::Api(ApiError::HttpError { status: 500, .. })));
        assert_eq!(client.state().list().len(), 1);
        assert!(!client.state().loading().is_delete_loading("1"));
    }

    #[test]
    fn failed_submit_keeps_draft_for_retry() {
        let mut client = TodoListClient::new("http://api.test");
        client.set_draft_title("Retry me");
        let transport = Scripted::default()
            .reply(503, "unavailable")
            .reply(201, r#"{"id":"9","title":"Retry me"}"#);
        assert!(client.submit_new_item(&transport).is_err());
        assert_eq!(client.state().draft_title(), "Retry me");
        client.submit_new_item(&transport).unwrap();
        assert_eq!(client.state().list(), &[item("9", "Retry me", false)]);
        assert!(client.state().last_error().is_none());
    }
}
