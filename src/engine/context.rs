//! 启动时构造一次的应用上下文，以及三个用户动作（兑换、添加/移除流动性）的编排入口。

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::chain::{AccountId, ContractAbi, ContractApi, NodeClient, load_contract};
use crate::config::SwapxConfig;
use crate::monitoring::events;
use crate::wallet::{InjectedAccount, WalletBridge, WalletProvider};

use super::error::{EngineError, EngineResult};
use super::guard::compute_bounds;
use super::quote::QuoteResolver;
use super::report::report;
use super::submit::TransactionSubmitter;
use super::types::{
    ActionKind, ExecParams, GuardedAction, GuardedAmounts, LiquidityKind, LiquidityRequest, Quote,
    SwapRequest, TokenRegistry, TradingPair, TxOutcome,
};

/// 报价 + 滑点保护之后、提交之前的兑换计划。
#[derive(Debug, Clone)]
pub struct SwapPlan {
    pub request: SwapRequest,
    pub quote: Quote,
    pub amount_in_units: u128,
    pub bounds: GuardedAmounts,
    pub action: GuardedAction,
}

/// 一次动作的终态：结果本身与渲染后的状态文本。
#[derive(Debug, Clone)]
pub struct ActionReport {
    pub kind: ActionKind,
    pub outcome: TxOutcome,
    pub status: String,
}

impl ActionReport {
    fn new(kind: ActionKind, outcome: TxOutcome) -> Self {
        let status = report(&outcome, kind);
        events::action_finished(kind, &outcome);
        Self {
            kind,
            outcome,
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

pub struct AppContext {
    account: AccountId,
    accounts: Vec<InjectedAccount>,
    tokens: TokenRegistry,
    exec: ExecParams,
    rate_scale: u128,
    quotes: QuoteResolver,
    submitter: TransactionSubmitter,
}

impl AppContext {
    /// 连接节点、授权钱包、选择账户并加载合约。任一步失败都不会返回部分初始化的上下文。
    pub async fn initialize(
        config: &SwapxConfig,
        account_override: Option<&str>,
    ) -> EngineResult<Self> {
        let contract_address = parse_contract_address(config)?;
        let exec = ExecParams::from_config(&config.execution)?;

        let abi = ContractAbi::load(&config.contract.abi_path)?;
        check_payable(&abi, &exec)?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| EngineError::Connection(format!("failed to build http client: {err}")))?;

        let node = NodeClient::connect(
            http.clone(),
            &config.chain.endpoint_url,
            Duration::from_millis(config.chain.request_timeout_ms),
        )
        .await?;

        let wallet = WalletBridge::new(
            http,
            &config.wallet.bridge_url,
            Duration::from_millis(config.chain.request_timeout_ms),
            Duration::from_millis(config.wallet.submit_timeout_ms),
        );

        let contract = load_contract(node, abi, contract_address);
        Self::assemble(
            config,
            exec,
            Arc::new(contract),
            Arc::new(wallet),
            account_override,
        )
        .await
    }

    /// 以给定的合约与钱包实现构造上下文；真实启动与测试共用这一路径。
    pub async fn with_collaborators(
        config: &SwapxConfig,
        contract: Arc<dyn ContractApi>,
        wallet: Arc<dyn WalletProvider>,
        account_override: Option<&str>,
    ) -> EngineResult<Self> {
        let exec = ExecParams::from_config(&config.execution)?;
        Self::assemble(config, exec, contract, wallet, account_override).await
    }

    async fn assemble(
        config: &SwapxConfig,
        exec: ExecParams,
        contract: Arc<dyn ContractApi>,
        wallet: Arc<dyn WalletProvider>,
        account_override: Option<&str>,
    ) -> EngineResult<Self> {
        let tokens = TokenRegistry::from_config(&config.tokens)?;
        let rate_scale = rate_scale(config)?;

        let extensions = wallet.enable(&config.wallet.app_name).await?;
        if extensions.is_empty() {
            return Err(EngineError::NoWalletAvailable);
        }
        let accounts = wallet.accounts().await?;
        let wanted = account_override.or(config.wallet.account.as_deref());
        let account = select_account(&accounts, wanted)?;

        if exec.gas_limit.is_unlimited() {
            warn!(
                target: "engine::context",
                "gas_limit 为 unlimited：交易不设 gas 上限，仅依赖钱包确认框人工把关"
            );
        }

        info!(
            target: "engine::context",
            contract = %contract.address(),
            account = %account,
            extensions = extensions.len(),
            accounts = accounts.len(),
            gas_limit = %exec.gas_limit,
            "初始化完成"
        );

        Ok(Self {
            quotes: QuoteResolver::new(Arc::clone(&contract)),
            submitter: TransactionSubmitter::new(contract, wallet, account.clone()),
            account,
            accounts,
            tokens,
            exec,
            rate_scale,
        })
    }

    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn accounts(&self) -> &[InjectedAccount] {
        &self.accounts
    }

    /// 报价 → 滑点保护。只读，不提交。
    pub async fn prepare_swap(
        &self,
        token_in: &str,
        amount_in: Decimal,
        token_out: &str,
        slippage_pct: Decimal,
    ) -> EngineResult<SwapPlan> {
        let pair = TradingPair::new(self.tokens.resolve(token_in)?, self.tokens.resolve(token_out)?)?;
        let request = SwapRequest::new(pair, amount_in, slippage_pct)?;
        let amount_in_units = request.amount_in_units()?;

        let quote = self.quotes.get_rate(&request.pair, &self.account).await?;
        let bounds = compute_bounds(
            amount_in_units,
            quote.rate,
            request.slippage_pct,
            self.rate_scale,
        )?;

        let action = GuardedAction::Swap {
            token_in: request.pair.token_in.address.clone(),
            amount_in: amount_in_units,
            token_out: request.pair.token_out.address.clone(),
            min_amount_out: bounds.min_amount_out,
        };

        Ok(SwapPlan {
            request,
            quote,
            amount_in_units,
            bounds,
            action,
        })
    }

    pub async fn swap(
        &self,
        token_in: &str,
        amount_in: Decimal,
        token_out: &str,
        slippage_pct: Decimal,
    ) -> ActionReport {
        let result = async {
            let plan = self
                .prepare_swap(token_in, amount_in, token_out, slippage_pct)
                .await?;
            self.submitter.submit(&plan.action, &self.exec).await
        }
        .await;
        ActionReport::new(ActionKind::Swap, outcome(result))
    }

    pub async fn add_liquidity(&self, token: &str, amount: Decimal) -> ActionReport {
        self.change_liquidity(LiquidityKind::Add, token, amount).await
    }

    pub async fn remove_liquidity(&self, token: &str, amount: Decimal) -> ActionReport {
        self.change_liquidity(LiquidityKind::Remove, token, amount).await
    }

    async fn change_liquidity(
        &self,
        kind: LiquidityKind,
        token: &str,
        amount: Decimal,
    ) -> ActionReport {
        let result = async {
            let request = LiquidityRequest::new(kind, self.tokens.resolve(token)?, amount)?;
            let token = request.token.address.clone();
            let amount = request.amount_units()?;
            let action = match kind {
                LiquidityKind::Add => GuardedAction::AddLiquidity { token, amount },
                LiquidityKind::Remove => GuardedAction::RemoveLiquidity { token, amount },
            };
            self.submitter.submit(&action, &self.exec).await
        }
        .await;
        ActionReport::new(kind.action(), outcome(result))
    }
}

fn outcome(result: EngineResult<super::types::TxReceipt>) -> TxOutcome {
    match result {
        Ok(receipt) => TxOutcome::Success(receipt),
        Err(err) => TxOutcome::from(err),
    }
}

fn parse_contract_address(config: &SwapxConfig) -> EngineResult<AccountId> {
    let raw = config.contract.address.trim();
    if raw.is_empty() {
        return Err(EngineError::InvalidConfig(
            "contract.address is required".to_string(),
        ));
    }
    raw.parse()
        .map_err(|err| EngineError::InvalidConfig(format!("contract.address: {err}")))
}

fn rate_scale(config: &SwapxConfig) -> EngineResult<u128> {
    match config.contract.rate_scale {
        0 => Err(EngineError::InvalidConfig(
            "contract.rate_scale must be positive".to_string(),
        )),
        scale => Ok(scale),
    }
}

/// 附带转账金额时，所有交易 message 都必须是 payable。
fn check_payable(abi: &ContractAbi, exec: &ExecParams) -> EngineResult<()> {
    if exec.value_attached == 0 {
        return Ok(());
    }
    if let Some(message) = abi
        .transaction_messages()
        .into_iter()
        .find(|message| !message.payable)
    {
        return Err(EngineError::InvalidConfig(format!(
            "execution.value_attached is {} but `{}` is not payable",
            exec.value_attached, message.label
        )));
    }
    Ok(())
}

fn select_account(
    accounts: &[InjectedAccount],
    wanted: Option<&str>,
) -> EngineResult<AccountId> {
    let parsed: Vec<AccountId> = accounts
        .iter()
        .filter_map(|account| match account.address.parse::<AccountId>() {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(
                    target: "engine::context",
                    address = %account.address,
                    error = %err,
                    "忽略无法解析的钱包账户"
                );
                None
            }
        })
        .collect();

    match wanted {
        Some(raw) => {
            let wanted: AccountId = raw
                .parse()
                .map_err(|err| EngineError::InvalidConfig(format!("wallet.account: {err}")))?;
            parsed
                .into_iter()
                .find(|account| *account == wanted)
                .ok_or_else(|| {
                    EngineError::InvalidConfig(format!(
                        "account {raw} is not available in the wallet"
                    ))
                })
        }
        None => parsed
            .into_iter()
            .next()
            .ok_or(EngineError::NoAccountAvailable),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::chain::abi::tests::SAMPLE_METADATA;
    use crate::chain::codec::{CallArg, encode_call};
    use crate::chain::{ChainError, ContractCall};
    use crate::config::TokenEntry;
    use crate::engine::types::TxReceipt;
    use crate::wallet::{Extension, SignRequest, WalletError};

    const CONTRACT: &str = "0x0000000000000000000000000000000000000000000000000000000000000009";
    const TOKEN_A: &str = "0x0101010101010101010101010101010101010101010101010101010101010101";
    const TOKEN_B: &str = "0x0202020202020202020202020202020202020202020202020202020202020202";
    const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
    const BOB: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";

    struct FakeContract {
        address: AccountId,
        rate: Result<u128, String>,
        quotes: Mutex<usize>,
    }

    impl FakeContract {
        fn with_rate(rate: Result<u128, String>) -> Self {
            Self {
                address: CONTRACT.parse().expect("contract"),
                rate,
                quotes: Mutex::new(0),
            }
        }

        fn call(&self, message: &str, selector: u8, args: &[CallArg<'_>]) -> ContractCall {
            ContractCall {
                dest: self.address.clone(),
                message: message.to_string(),
                data: encode_call([selector; 4], args),
                payable: false,
            }
        }
    }

    #[async_trait]
    impl ContractApi for FakeContract {
        fn address(&self) -> &AccountId {
            &self.address
        }

        async fn query_swap_rate(
            &self,
            _caller: &AccountId,
            _token_in: &AccountId,
            _token_out: &AccountId,
        ) -> Result<u128, ChainError> {
            *self.quotes.lock().expect("lock") += 1;
            self.rate.clone().map_err(ChainError::Reverted)
        }

        fn swap_call(
            &self,
            token_in: &AccountId,
            amount_in: u128,
            token_out: &AccountId,
            min_amount_out: u128,
        ) -> ContractCall {
            self.call(
                "swap_tokens",
                1,
                &[
                    CallArg::Account(token_in),
                    CallArg::U128(amount_in),
                    CallArg::Account(token_out),
                    CallArg::U128(min_amount_out),
                ],
            )
        }

        fn add_liquidity_call(&self, token: &AccountId, amount: u128) -> ContractCall {
            self.call("add_liquidity", 2, &[CallArg::Account(token), CallArg::U128(amount)])
        }

        fn remove_liquidity_call(&self, token: &AccountId, amount: u128) -> ContractCall {
            self.call(
                "remove_liquidity",
                3,
                &[CallArg::Account(token), CallArg::U128(amount)],
            )
        }
    }

    struct FakeWallet {
        extensions: Vec<Extension>,
        accounts: Vec<InjectedAccount>,
        submit: Result<(), String>,
        submissions: Mutex<Vec<SignRequest>>,
    }

    impl FakeWallet {
        fn new(accounts: &[&str], submit: Result<(), String>) -> Self {
            Self {
                extensions: vec![Extension {
                    name: "polkadot-js".to_string(),
                    version: Some("0.44.1".to_string()),
                }],
                accounts: accounts
                    .iter()
                    .map(|address| InjectedAccount {
                        address: address.to_string(),
                        name: None,
                        key_type: None,
                    })
                    .collect(),
                submit,
                submissions: Mutex::new(Vec::new()),
            }
        }

        fn submissions(&self) -> Vec<SignRequest> {
            self.submissions.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl WalletProvider for FakeWallet {
        async fn enable(&self, _app_name: &str) -> Result<Vec<Extension>, WalletError> {
            Ok(self.extensions.clone())
        }

        async fn accounts(&self) -> Result<Vec<InjectedAccount>, WalletError> {
            Ok(self.accounts.clone())
        }

        async fn sign_and_send(&self, request: &SignRequest) -> Result<TxReceipt, WalletError> {
            self.submissions.lock().expect("lock").push(request.clone());
            match &self.submit {
                Ok(()) => Ok(TxReceipt {
                    tx_hash: "0xfeed".to_string(),
                    block_hash: Some("0xb10c".to_string()),
                    status: "InBlock".to_string(),
                }),
                Err(reason) => Err(WalletError::Rejected(reason.clone())),
            }
        }
    }

    fn config() -> SwapxConfig {
        let mut config = SwapxConfig::default();
        config.contract.address = CONTRACT.to_string();
        config.tokens.entries = vec![
            TokenEntry {
                symbol: "AAA".to_string(),
                address: TOKEN_A.to_string(),
                decimals: 0,
            },
            TokenEntry {
                symbol: "BBB".to_string(),
                address: TOKEN_B.to_string(),
                decimals: 0,
            },
        ];
        config
    }

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).expect("decimal")
    }

    async fn context(
        contract: Arc<FakeContract>,
        wallet: Arc<FakeWallet>,
    ) -> AppContext {
        AppContext::with_collaborators(&config(), contract, wallet, None)
            .await
            .expect("context")
    }

    #[tokio::test(flavor = "current_thread")]
    async fn swap_submits_guarded_minimum() {
        let contract = Arc::new(FakeContract::with_rate(Ok(2_000_000_000_000_000_000)));
        let wallet = Arc::new(FakeWallet::new(&[ALICE], Ok(())));
        let ctx = context(Arc::clone(&contract), Arc::clone(&wallet)).await;

        let plan = ctx
            .prepare_swap("AAA", dec("100"), "BBB", dec("1"))
            .await
            .expect("plan");
        assert_eq!(plan.bounds.amount_out, 200);
        assert_eq!(plan.bounds.min_amount_out, 198);

        let report = ctx.swap("AAA", dec("100"), "BBB", dec("1")).await;
        assert_eq!(report.status, "Swap successful!");
        assert!(report.is_success());

        let submissions = wallet.submissions();
        assert_eq!(submissions.len(), 1);
        let data = &submissions[0].call.data;
        assert_eq!(&data[..4], &[1, 1, 1, 1]);
        let min_out = u128::from_le_bytes(data[data.len() - 16..].try_into().expect("u128"));
        assert_eq!(min_out, 198);
        assert_eq!(submissions[0].signer, ALICE);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn quote_revert_aborts_before_submission() {
        let contract = Arc::new(FakeContract::with_rate(Err(
            "Insufficient liquidity for tokenOut".to_string(),
        )));
        let wallet = Arc::new(FakeWallet::new(&[ALICE], Ok(())));
        let ctx = context(Arc::clone(&contract), Arc::clone(&wallet)).await;

        let report = ctx.swap("AAA", dec("100"), "BBB", dec("1")).await;
        assert!(!report.is_success());
        assert!(report.status.starts_with("Error: quote unavailable"));
        assert!(report.status.contains("Insufficient liquidity"));
        assert!(wallet.submissions().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn zero_rate_is_quote_unavailable() {
        let contract = Arc::new(FakeContract::with_rate(Ok(0)));
        let wallet = Arc::new(FakeWallet::new(&[ALICE], Ok(())));
        let ctx = context(contract, Arc::clone(&wallet)).await;

        let report = ctx.swap("AAA", dec("1"), "BBB", dec("1")).await;
        assert!(report.status.starts_with("Error: quote unavailable"));
        assert!(wallet.submissions().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn minimum_rounding_to_zero_never_reaches_wallet() {
        let contract = Arc::new(FakeContract::with_rate(Ok(1)));
        let wallet = Arc::new(FakeWallet::new(&[ALICE], Ok(())));
        let ctx = context(Arc::clone(&contract), Arc::clone(&wallet)).await;

        let report = ctx.swap("AAA", dec("100"), "BBB", dec("1")).await;
        assert!(!report.is_success());
        assert_eq!(
            report.status,
            "Error: invalid amount: expected output rounds to zero"
        );
        assert_eq!(*contract.quotes.lock().expect("lock"), 1);
        assert!(wallet.submissions().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn swap_beyond_96_bits_submits_exact_minimum() {
        let mut config = config();
        config.tokens.entries[0].decimals = 18;
        config.tokens.entries[1].decimals = 18;
        let contract = Arc::new(FakeContract::with_rate(Ok(2_000_000_000_000_000_000)));
        let wallet = Arc::new(FakeWallet::new(&[ALICE], Ok(())));
        let ctx = AppContext::with_collaborators(
            &config,
            contract,
            Arc::clone(&wallet) as Arc<dyn WalletProvider>,
            None,
        )
        .await
        .expect("context");

        let report = ctx.swap("AAA", dec("100000000000"), "BBB", dec("1")).await;
        assert_eq!(report.status, "Swap successful!");
        let data = &wallet.submissions()[0].call.data;
        let min_out = u128::from_le_bytes(data[data.len() - 16..].try_into().expect("u128"));
        assert_eq!(min_out, 198_000_000_000_000_000_000_000_000_000);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn wallet_rejection_is_reported_verbatim() {
        let contract = Arc::new(FakeContract::with_rate(Ok(2_000_000_000_000_000_000)));
        let wallet = Arc::new(FakeWallet::new(&[ALICE], Err("Cancelled".to_string())));
        let ctx = context(contract, Arc::clone(&wallet)).await;

        let report = ctx.swap("AAA", dec("100"), "BBB", dec("1")).await;
        assert_eq!(report.status, "Error: Cancelled");
        assert_eq!(wallet.submissions().len(), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn zero_liquidity_amount_never_reaches_wallet() {
        let contract = Arc::new(FakeContract::with_rate(Ok(1)));
        let wallet = Arc::new(FakeWallet::new(&[ALICE], Ok(())));
        let ctx = context(contract, Arc::clone(&wallet)).await;

        let report = ctx.add_liquidity("AAA", Decimal::ZERO).await;
        assert!(report.status.starts_with("Error: invalid amount"));
        assert!(wallet.submissions().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn liquidity_actions_report_fixed_sentences() {
        let contract = Arc::new(FakeContract::with_rate(Ok(1)));
        let wallet = Arc::new(FakeWallet::new(&[ALICE], Ok(())));
        let ctx = context(Arc::clone(&contract), Arc::clone(&wallet)).await;

        let added = ctx.add_liquidity("AAA", dec("5")).await;
        assert_eq!(added.status, "Liquidity added successfully!");
        let removed = ctx.remove_liquidity("BBB", dec("2")).await;
        assert_eq!(removed.status, "Liquidity removed successfully!");

        let submissions = wallet.submissions();
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].call.message, "add_liquidity");
        assert_eq!(submissions[1].call.message, "remove_liquidity");
        assert_eq!(*contract.quotes.lock().expect("lock"), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn invalid_slippage_skips_quote() {
        let contract = Arc::new(FakeContract::with_rate(Ok(1)));
        let wallet = Arc::new(FakeWallet::new(&[ALICE], Ok(())));
        let ctx = context(Arc::clone(&contract), Arc::clone(&wallet)).await;

        let report = ctx.swap("AAA", dec("1"), "BBB", dec("100")).await;
        assert_eq!(report.status, "Error: invalid slippage 100%: must be in [0, 100)");
        assert_eq!(*contract.quotes.lock().expect("lock"), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn same_token_pair_is_rejected() {
        let contract = Arc::new(FakeContract::with_rate(Ok(1)));
        let wallet = Arc::new(FakeWallet::new(&[ALICE], Ok(())));
        let ctx = context(contract, Arc::clone(&wallet)).await;

        let report = ctx.swap("AAA", dec("1"), TOKEN_A, dec("1")).await;
        assert!(report.status.starts_with("Error: invalid trading pair"));
        assert!(wallet.submissions().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn empty_wallet_fails_startup() {
        let contract = Arc::new(FakeContract::with_rate(Ok(1)));
        let mut wallet = FakeWallet::new(&[], Ok(()));
        let no_accounts = AppContext::with_collaborators(
            &config(),
            Arc::clone(&contract) as Arc<dyn ContractApi>,
            Arc::new(FakeWallet::new(&[], Ok(()))),
            None,
        )
        .await;
        assert!(matches!(no_accounts, Err(EngineError::NoAccountAvailable)));

        wallet.extensions.clear();
        let no_extension =
            AppContext::with_collaborators(&config(), contract, Arc::new(wallet), None).await;
        assert!(matches!(no_extension, Err(EngineError::NoWalletAvailable)));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn account_override_must_exist_in_wallet() {
        let contract: Arc<dyn ContractApi> = Arc::new(FakeContract::with_rate(Ok(1)));
        let wallet: Arc<dyn WalletProvider> = Arc::new(FakeWallet::new(&[ALICE, BOB], Ok(())));

        let ctx = AppContext::with_collaborators(
            &config(),
            Arc::clone(&contract),
            Arc::clone(&wallet),
            Some(BOB),
        )
        .await
        .expect("bob");
        assert_eq!(ctx.account().address(), BOB);

        let missing = AppContext::with_collaborators(
            &config(),
            contract,
            wallet,
            Some("0x0303030303030303030303030303030303030303030303030303030303030303"),
        )
        .await;
        assert!(matches!(missing, Err(EngineError::InvalidConfig(_))));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn unlimited_gas_without_opt_in_fails_startup() {
        let mut config = config();
        config.execution.gas_limit = crate::engine::GasLimit::Unlimited;
        let result = AppContext::with_collaborators(
            &config,
            Arc::new(FakeContract::with_rate(Ok(1))),
            Arc::new(FakeWallet::new(&[ALICE], Ok(()))),
            None,
        )
        .await;
        let err = result.err().expect("startup error");
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn attached_value_requires_payable_messages() {
        let abi = ContractAbi::from_json(SAMPLE_METADATA).expect("abi");
        let paying = ExecParams {
            value_attached: 1,
            gas_limit: crate::engine::GasLimit::Limited(1),
        };
        assert!(matches!(
            check_payable(&abi, &paying),
            Err(EngineError::InvalidConfig(_))
        ));
        let free = ExecParams {
            value_attached: 0,
            ..paying
        };
        assert!(check_payable(&abi, &free).is_ok());
    }

    #[test]
    fn missing_contract_address_is_invalid_config() {
        let config = SwapxConfig::default();
        assert!(matches!(
            parse_contract_address(&config),
            Err(EngineError::InvalidConfig(_))
        ));
    }
}
