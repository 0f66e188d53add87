//! Claim workflow controller
//!
//! Owns the UI-facing state (selected chain, entered address, submission
//! status, last message, last tx hash) and orchestrates the registry, the
//! balance observer and the submitter in response to user actions.
//!
//! Submission moves `Idle -> Validating -> (Submitting | Rejected) ->
//! Settled`; no state is terminal, the workflow restarts by changing chain
//! or re-triggering submit after a failure.

use crate::submitter::{ClaimRequest, ClaimResult, ClaimSubmitter};
use sokushuu_chain::{Address, ChainId, ChainMetadata, ChainRegistry};
use sokushuu_wallet::{Balance, BalanceKey, BalanceObserver, WalletResult};
use std::sync::Arc;
use tracing::{debug, info};

/// Message shown when the entered address fails the local format check.
pub const INVALID_ADDRESS_MESSAGE: &str = "Address format is not valid";

/// UI-facing state. The controller is its only writer; display consumers
/// read it through [`ClaimWorkflow::state`].
#[derive(Debug, Clone)]
pub struct WorkflowState {
    /// Selected network; `None` only when the registry lists nothing
    pub selected_chain: Option<ChainId>,
    /// Whether the chain-selection panel is visible
    pub chain_selection_is_shown: bool,
    /// User address exactly as entered, unvalidated
    pub user_address: Option<String>,
    /// Last error/info text
    pub message: Option<String>,
    /// Transaction hash of the last successful claim
    pub tx_hash: Option<String>,
    /// Whether a submission is in flight
    pub is_submitting: bool,
}

/// The claim workflow controller.
pub struct ClaimWorkflow {
    registry: Arc<ChainRegistry>,
    observer: Arc<BalanceObserver>,
    submitter: ClaimSubmitter,
    faucet_address: Address,
    state: WorkflowState,
}

impl ClaimWorkflow {
    /// Fresh workflow: first listed chain selected, selection panel open.
    pub fn new(
        registry: Arc<ChainRegistry>,
        observer: Arc<BalanceObserver>,
        submitter: ClaimSubmitter,
        faucet_address: Address,
    ) -> Self {
        let selected_chain = registry.first_listed().map(|entry| entry.id);
        Self {
            registry,
            observer,
            submitter,
            faucet_address,
            state: WorkflowState {
                selected_chain,
                chain_selection_is_shown: true,
                user_address: None,
                message: None,
                tx_hash: None,
                is_submitting: false,
            },
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Metadata of the selected chain.
    pub fn selected_metadata(&self) -> Option<&ChainMetadata> {
        self.state
            .selected_chain
            .and_then(|id| self.registry.metadata_for(id))
    }

    /// Select a listed chain. Resets the entered address and clears any
    /// pending message or tx hash, starting a fresh context for the new
    /// chain. Unknown and unlisted ids are refused.
    pub fn select_chain(&mut self, id: ChainId) -> bool {
        let listed = self
            .registry
            .metadata_for(id)
            .map(|entry| entry.listed)
            .unwrap_or(false);
        if !listed {
            debug!("Refusing selection of unknown or unlisted chain {}", id);
            return false;
        }

        self.state.user_address = None;
        self.state.message = None;
        self.state.tx_hash = None;
        self.state.selected_chain = Some(id);
        true
    }

    /// Collapse the selection panel; only possible once a chain is chosen.
    pub fn close_chain_selection(&mut self) -> bool {
        if self.state.selected_chain.is_none() {
            return false;
        }
        self.state.chain_selection_is_shown = false;
        true
    }

    pub fn open_chain_selection(&mut self) {
        self.state.chain_selection_is_shown = true;
    }

    /// Store the entered address verbatim. Validation is deferred to submit
    /// time; a stored tx hash is deliberately left alone.
    pub fn set_address(&mut self, raw: impl Into<String>) {
        self.state.user_address = Some(raw.into());
    }

    /// Whether submit would currently be accepted.
    pub fn can_submit(&self) -> bool {
        !self.state.is_submitting && self.state.tx_hash.is_none()
    }

    /// Label for the submit action in its current state.
    pub fn submit_label(&self) -> &'static str {
        if self.state.is_submitting {
            "Claiming..."
        } else if self.state.tx_hash.is_some() {
            "Claimed"
        } else {
            "Claim"
        }
    }

    /// Run one claim attempt.
    ///
    /// Refused as a no-op while a submission is in flight or once a tx hash
    /// exists for the current context. A malformed address settles locally
    /// with [`INVALID_ADDRESS_MESSAGE`] and never reaches the network. A
    /// successful claim stores the hash and invalidates both balance cache
    /// keys so the next reads reflect the transfer.
    pub async fn submit(&mut self) {
        if !self.can_submit() {
            debug!("Submit refused: already claimed or submission in flight");
            return;
        }
        let Some(chain) = self.state.selected_chain else {
            debug!("Submit refused: no chain selected");
            return;
        };

        self.state.message = None;
        self.state.tx_hash = None;

        let address: Address = match self.state.user_address.as_deref().unwrap_or("").parse() {
            Ok(address) => address,
            Err(_) => {
                self.state.message = Some(INVALID_ADDRESS_MESSAGE.to_string());
                return;
            }
        };

        self.state.is_submitting = true;
        let request = ClaimRequest {
            chain,
            address: address.clone(),
        };
        let result = self.submitter.submit(&request).await;
        self.state.is_submitting = false;

        match result {
            ClaimResult::Success { tx_hash } => {
                info!("Claim settled on chain {}: {}", chain, tx_hash);
                self.state.tx_hash = Some(tx_hash);
                self.observer
                    .invalidate(&BalanceKey::new(chain, &self.faucet_address))
                    .await;
                self.observer
                    .invalidate(&BalanceKey::new(chain, &address))
                    .await;
            }
            ClaimResult::Failure { message } => {
                info!("Claim failed on chain {}: {}", chain, message);
                self.state.message = Some(message);
            }
        }
    }

    /// Balance of the faucet's own address on the selected chain.
    pub async fn faucet_balance(&self) -> WalletResult<Option<Balance>> {
        let Some(chain) = self.state.selected_chain else {
            return Ok(None);
        };
        self.observer.observe(chain, Some(&self.faucet_address)).await
    }

    /// Balance of the entered address on the selected chain. Unresolved
    /// until the entered text parses as a valid address.
    pub async fn user_balance(&self) -> WalletResult<Option<Balance>> {
        let Some(chain) = self.state.selected_chain else {
            return Ok(None);
        };
        let address = self
            .state
            .user_address
            .as_deref()
            .and_then(|raw| raw.parse::<Address>().ok());
        self.observer.observe(chain, address.as_ref()).await
    }

    /// Explorer link for the settled claim, if any.
    pub fn explorer_tx_uri(&self) -> Option<String> {
        let tx_hash = self.state.tx_hash.as_deref()?;
        Some(self.selected_metadata()?.explorer_tx_uri(tx_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submitter::SERVER_ERROR_MESSAGE;
    use async_trait::async_trait;
    use serde_json::json;
    use sokushuu_chain::PrivateEndpoints;
    use sokushuu_wallet::{BalanceSource, WalletError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const USER_ADDRESS: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
    const FAUCET_ADDRESS: &str = "0x00000000000000000000000000000000000f4ce7";

    struct CountingSource {
        calls: AtomicUsize,
    }

    impl CountingSource {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BalanceSource for CountingSource {
        async fn fetch(&self, _chain: ChainId, _address: &Address) -> Result<Balance, WalletError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Balance::new(5_000, "MON"))
        }
    }

    fn registry() -> Arc<ChainRegistry> {
        Arc::new(ChainRegistry::with_default_chains(&PrivateEndpoints {
            pharos_testnet_rpc_uri: "https://pharos-testnet.example/rpc".to_string(),
            pharos_devnet_rpc_uri: "https://pharos-devnet.example/rpc".to_string(),
        }))
    }

    fn workflow(backend_uri: &str, source: Arc<CountingSource>) -> ClaimWorkflow {
        ClaimWorkflow::new(
            registry(),
            Arc::new(BalanceObserver::new(source)),
            ClaimSubmitter::new(backend_uri),
            FAUCET_ADDRESS.parse().unwrap(),
        )
    }

    #[test]
    fn test_initial_state_selects_first_listed_chain_with_panel_open() {
        let workflow = workflow("http://127.0.0.1:0", CountingSource::new());
        let state = workflow.state();
        assert_eq!(state.selected_chain, Some(ChainId(10143)));
        assert!(state.chain_selection_is_shown);
        assert!(state.user_address.is_none());
        assert!(workflow.can_submit());
        assert_eq!(workflow.submit_label(), "Claim");
    }

    #[tokio::test]
    async fn test_successful_claim_settles_with_hash() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/faucet/10143"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"ok": true, "hash": "0xabc123"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut workflow = workflow(&server.uri(), CountingSource::new());
        assert!(workflow.select_chain(ChainId(10143)));
        assert!(workflow.close_chain_selection());
        workflow.set_address(USER_ADDRESS);
        workflow.submit().await;

        let state = workflow.state();
        assert_eq!(state.tx_hash.as_deref(), Some("0xabc123"));
        assert!(state.message.is_none());
        assert!(!state.is_submitting);
        assert_eq!(workflow.submit_label(), "Claimed");
        assert!(!workflow.can_submit());
        assert_eq!(
            workflow.explorer_tx_uri().as_deref(),
            Some("https://testnet.monadexplorer.com/tx/0xabc123")
        );
    }

    #[tokio::test]
    async fn test_invalid_address_settles_locally_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(0)
            .mount(&server)
            .await;

        let mut workflow = workflow(&server.uri(), CountingSource::new());
        workflow.set_address("not-an-address");
        workflow.submit().await;

        let state = workflow.state();
        assert_eq!(state.message.as_deref(), Some(INVALID_ADDRESS_MESSAGE));
        assert!(state.tx_hash.is_none());
        assert!(workflow.can_submit());
    }

    #[tokio::test]
    async fn test_empty_address_is_rejected_like_the_original_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(0)
            .mount(&server)
            .await;

        let mut workflow = workflow(&server.uri(), CountingSource::new());
        workflow.submit().await;

        assert_eq!(
            workflow.state().message.as_deref(),
            Some(INVALID_ADDRESS_MESSAGE)
        );
    }

    #[tokio::test]
    async fn test_backend_rejection_surfaces_message_and_stays_submittable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/faucet/10143"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"ok": false, "message": "Already claimed today"}),
            ))
            .mount(&server)
            .await;

        let mut workflow = workflow(&server.uri(), CountingSource::new());
        workflow.set_address(USER_ADDRESS);
        workflow.submit().await;

        let state = workflow.state();
        assert_eq!(state.message.as_deref(), Some("Already claimed today"));
        assert!(state.tx_hash.is_none());
        assert!(workflow.can_submit());
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_generic_message() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let mut workflow = workflow(&uri, CountingSource::new());
        workflow.set_address(USER_ADDRESS);
        workflow.submit().await;

        let state = workflow.state();
        assert_eq!(state.message.as_deref(), Some(SERVER_ERROR_MESSAGE));
        assert!(state.tx_hash.is_none());
        assert!(workflow.can_submit());
    }

    #[tokio::test]
    async fn test_second_submit_after_success_is_refused_without_a_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/faucet/10143"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"ok": true, "hash": "0xabc123"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut workflow = workflow(&server.uri(), CountingSource::new());
        workflow.set_address(USER_ADDRESS);
        workflow.submit().await;
        workflow.submit().await;

        // wiremock verifies exactly one request on drop
        assert_eq!(workflow.state().tx_hash.as_deref(), Some("0xabc123"));
    }

    #[tokio::test]
    async fn test_switching_chain_clears_address_message_and_hash() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"ok": true, "hash": "0xabc123"})),
            )
            .mount(&server)
            .await;

        let mut workflow = workflow(&server.uri(), CountingSource::new());
        workflow.set_address(USER_ADDRESS);
        workflow.submit().await;
        assert!(workflow.state().tx_hash.is_some());

        assert!(workflow.select_chain(ChainId(656476)));

        let state = workflow.state();
        assert_eq!(state.selected_chain, Some(ChainId(656476)));
        assert!(state.user_address.is_none());
        assert!(state.message.is_none());
        assert!(state.tx_hash.is_none());
        assert!(workflow.can_submit());
    }

    #[tokio::test]
    async fn test_editing_address_keeps_the_settled_hash() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"ok": true, "hash": "0xabc123"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut workflow = workflow(&server.uri(), CountingSource::new());
        workflow.set_address(USER_ADDRESS);
        workflow.submit().await;

        workflow.set_address("0x0000000000000000000000000000000000000002");
        assert_eq!(workflow.state().tx_hash.as_deref(), Some("0xabc123"));
        assert!(!workflow.can_submit());
        workflow.submit().await;
    }

    #[test]
    fn test_unlisted_and_unknown_chains_cannot_be_selected() {
        let mut workflow = workflow("http://127.0.0.1:0", CountingSource::new());
        assert!(!workflow.select_chain(ChainId(50002)));
        assert!(!workflow.select_chain(ChainId(1)));
        assert_eq!(workflow.state().selected_chain, Some(ChainId(10143)));
    }

    #[test]
    fn test_panel_reopens_on_demand() {
        let mut workflow = workflow("http://127.0.0.1:0", CountingSource::new());
        assert!(workflow.close_chain_selection());
        assert!(!workflow.state().chain_selection_is_shown);
        workflow.open_chain_selection();
        assert!(workflow.state().chain_selection_is_shown);
    }

    #[tokio::test]
    async fn test_success_invalidates_both_balance_streams() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"ok": true, "hash": "0xabc123"})),
            )
            .mount(&server)
            .await;

        let source = CountingSource::new();
        let mut workflow = workflow(&server.uri(), source.clone());
        workflow.set_address(USER_ADDRESS);

        workflow.faucet_balance().await.unwrap();
        workflow.user_balance().await.unwrap();
        assert_eq!(source.calls(), 2);

        // cached while nothing changed
        workflow.faucet_balance().await.unwrap();
        workflow.user_balance().await.unwrap();
        assert_eq!(source.calls(), 2);

        workflow.submit().await;

        workflow.faucet_balance().await.unwrap();
        workflow.user_balance().await.unwrap();
        assert_eq!(source.calls(), 4);
    }

    #[tokio::test]
    async fn test_failure_leaves_balance_cache_alone() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"ok": false, "message": "Already claimed today"}),
            ))
            .mount(&server)
            .await;

        let source = CountingSource::new();
        let mut workflow = workflow(&server.uri(), source.clone());
        workflow.set_address(USER_ADDRESS);

        workflow.faucet_balance().await.unwrap();
        workflow.user_balance().await.unwrap();
        workflow.submit().await;
        workflow.faucet_balance().await.unwrap();
        workflow.user_balance().await.unwrap();

        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_user_balance_is_unresolved_for_garbage_input() {
        let source = CountingSource::new();
        let workflow = {
            let mut w = workflow("http://127.0.0.1:0", source.clone());
            w.set_address("not-an-address");
            w
        };

        let observed = workflow.user_balance().await.unwrap();
        assert!(observed.is_none());
        assert_eq!(source.calls(), 0);
    }
}
