//! Lifecycle orchestrator: runs the six phases against a ledger.
//!
//! Each step is applied to a staged copy of the local [`TokenState`] first, so
//! invalid operations never reach the ledger. The staged copy replaces the
//! local state only after the ledger confirms the signed transaction; a
//! failure or cancellation at any await point leaves local state as of the
//! last confirmed step.

use tokenlife_crypto::{derive_token_account, generate_keypair};
use tokenlife_ledger::{AccountSnapshot, LedgerClient, MintSnapshot, Transaction};
use tokenlife_token::{AuthorityError, Operation, Outcome, StateError, TokenError, TokenState};
use tokenlife_types::{Authority, AuthorityType, Identity, TokenAmount};

use crate::config::LifecycleConfig;
use crate::error::{ConfigError, LifecycleError, LifecycleFailure};
use crate::phase::Phase;
use crate::report::{LifecycleReport, StepConfirmation};
use crate::wallet::{Role, WalletConfig};

/// Configured amounts, already scaled to base units.
#[derive(Clone, Copy, Debug)]
struct Amounts {
    initial_supply: TokenAmount,
    transfer: TokenAmount,
    delegated_supply: TokenAmount,
}

pub struct LifecycleOrchestrator<C> {
    client: C,
    config: LifecycleConfig,
    amounts: Amounts,
    wallets: WalletConfig,
    mint: Identity,
    team_account: Identity,
    user_account: Identity,
    state: TokenState,
    nonce: u64,
    confirmations: Vec<StepConfirmation>,
    completed: Option<Phase>,
}

impl<C: LedgerClient> LifecycleOrchestrator<C> {
    /// Create an orchestrator for a fresh, randomly addressed mint.
    pub fn new(client: C, config: LifecycleConfig, wallets: WalletConfig) -> Result<Self, ConfigError> {
        let mint = generate_keypair().identity();
        Self::with_mint(client, config, wallets, mint)
    }

    /// Create an orchestrator for a mint at a known address.
    pub fn with_mint(
        client: C,
        config: LifecycleConfig,
        wallets: WalletConfig,
        mint: Identity,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let amounts = Amounts {
            initial_supply: config.raw(config.initial_supply)?,
            transfer: config.raw(config.transfer_amount)?,
            delegated_supply: config.raw(config.delegated_supply)?,
        };
        let team_account = derive_token_account(&mint, &wallets.identity(Role::AuthorityA));
        let user_account = derive_token_account(&mint, &wallets.identity(Role::User));
        Ok(Self {
            client,
            config,
            amounts,
            wallets,
            mint,
            team_account,
            user_account,
            state: TokenState::new(),
            nonce: 0,
            confirmations: Vec::new(),
            completed: None,
        })
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn mint(&self) -> Identity {
        self.mint
    }

    pub fn team_account(&self) -> Identity {
        self.team_account
    }

    pub fn user_account(&self) -> Identity {
        self.user_account
    }

    /// Local state as of the last confirmed step.
    pub fn state(&self) -> &TokenState {
        &self.state
    }

    pub fn confirmations(&self) -> &[StepConfirmation] {
        &self.confirmations
    }

    /// The last phase that finished and passed verification.
    pub fn completed_phase(&self) -> Option<Phase> {
        self.completed
    }

    /// Run all six phases in order, halting at the first failure.
    ///
    /// Meant to be called once per orchestrator: a second run would try to
    /// create the same mint again and fail in genesis.
    pub async fn run(&mut self) -> Result<LifecycleReport, LifecycleError> {
        self.log_wallets().await?;
        for phase in Phase::ALL {
            self.run_phase(phase).await?;
        }
        let report = self.report().map_err(|e| {
            LifecycleError::new(Phase::Finalization, "build report", TokenError::from(e))
        })?;
        tracing::info!(
            mint = %report.mint,
            supply = %report.supply.to_ui_string(report.decimals),
            steps = report.confirmations.len(),
            "token lifecycle complete"
        );
        Ok(report)
    }

    async fn run_phase(&mut self, phase: Phase) -> Result<(), LifecycleError> {
        tracing::info!(%phase, "phase starting");
        match phase {
            Phase::Genesis => self.genesis().await?,
            Phase::Growth => self.growth().await?,
            Phase::Delegation => self.delegation().await?,
            Phase::FreezeCycle => self.freeze_cycle().await?,
            Phase::DelegatedGrowth => self.delegated_growth().await?,
            Phase::Finalization => self.finalization().await?,
        }
        self.verify(phase).await?;
        self.completed = Some(phase);
        tracing::info!(%phase, "phase complete");
        Ok(())
    }

    async fn genesis(&mut self) -> Result<(), LifecycleError> {
        let phase = Phase::Genesis;
        let a = self.wallets.identity(Role::AuthorityA);
        let b = self.wallets.identity(Role::AuthorityB);
        let c = self.wallets.identity(Role::User);
        let mint = self.mint;

        let create_mint = Operation::CreateMint {
            mint,
            payer: a,
            mint_authority: a,
            freeze_authority: Some(b),
            decimals: self.config.decimals,
        };
        self.step(phase, "create mint", Role::AuthorityA, create_mint)
            .await?;

        for (step, holder) in [("create team account", a), ("create user account", c)] {
            let op = Operation::CreateAccount {
                mint,
                holder,
                payer: a,
            };
            if let Outcome::AccountReady { account, created } =
                self.step(phase, step, Role::AuthorityA, op).await?
            {
                tracing::info!(%account, %holder, created, "token account ready");
            }
        }
        Ok(())
    }

    async fn growth(&mut self) -> Result<(), LifecycleError> {
        let phase = Phase::Growth;
        let a = self.wallets.identity(Role::AuthorityA);

        let issue = Operation::MintTo {
            mint: self.mint,
            destination: self.team_account,
            authority: a,
            amount: self.amounts.initial_supply,
        };
        self.step(phase, "issue initial supply", Role::AuthorityA, issue)
            .await?;

        let transfer = Operation::Transfer {
            source: self.team_account,
            destination: self.user_account,
            owner: a,
            amount: self.amounts.transfer,
        };
        self.step(phase, "transfer to user", Role::AuthorityA, transfer)
            .await?;
        Ok(())
    }

    async fn delegation(&mut self) -> Result<(), LifecycleError> {
        let op = Operation::SetAuthority {
            mint: self.mint,
            kind: AuthorityType::MintTokens,
            current: self.wallets.identity(Role::AuthorityA),
            new: Some(self.wallets.identity(Role::AuthorityB)),
        };
        self.step(
            Phase::Delegation,
            "delegate mint authority",
            Role::AuthorityA,
            op,
        )
        .await?;
        Ok(())
    }

    async fn freeze_cycle(&mut self) -> Result<(), LifecycleError> {
        let phase = Phase::FreezeCycle;
        let b = self.wallets.identity(Role::AuthorityB);

        let freeze = Operation::FreezeAccount {
            account: self.user_account,
            mint: self.mint,
            authority: b,
        };
        self.step(phase, "freeze user account", Role::AuthorityB, freeze)
            .await?;

        let thaw = Operation::ThawAccount {
            account: self.user_account,
            mint: self.mint,
            authority: b,
        };
        self.step(phase, "thaw user account", Role::AuthorityB, thaw)
            .await?;
        Ok(())
    }

    async fn delegated_growth(&mut self) -> Result<(), LifecycleError> {
        let op = Operation::MintTo {
            mint: self.mint,
            destination: self.user_account,
            authority: self.wallets.identity(Role::AuthorityB),
            amount: self.amounts.delegated_supply,
        };
        self.step(
            Phase::DelegatedGrowth,
            "issue delegated supply",
            Role::AuthorityB,
            op,
        )
        .await?;
        Ok(())
    }

    /// Revoke both authorities, each signed by whoever currently holds it.
    async fn finalization(&mut self) -> Result<(), LifecycleError> {
        let phase = Phase::Finalization;
        for (step, kind) in [
            ("revoke mint authority", AuthorityType::MintTokens),
            ("revoke freeze authority", AuthorityType::FreezeAccount),
        ] {
            let role = self
                .holder_of(kind)
                .map_err(|e| LifecycleError::new(phase, step, e))?;
            let op = Operation::SetAuthority {
                mint: self.mint,
                kind,
                current: self.wallets.identity(role),
                new: None,
            };
            self.step(phase, step, role, op).await?;
        }
        Ok(())
    }

    /// Which wallet currently holds `kind` on the mint.
    fn holder_of(&self, kind: AuthorityType) -> Result<Role, TokenError> {
        let mint = self.state.mint(&self.mint)?;
        match *mint.authority(kind) {
            Authority::Revoked => Err(AuthorityError::Revoked(kind).into()),
            Authority::Active(holder) => [Role::AuthorityA, Role::AuthorityB, Role::User]
                .into_iter()
                .find(|role| self.wallets.identity(*role) == holder)
                .ok_or_else(|| {
                    AuthorityError::Unauthorized {
                        kind,
                        signer: self.wallets.identity(Role::AuthorityA),
                        authority: holder,
                    }
                    .into()
                }),
        }
    }

    /// Validate locally, sign, submit, and commit on confirmation.
    async fn step(
        &mut self,
        phase: Phase,
        step: &'static str,
        role: Role,
        operation: Operation,
    ) -> Result<Outcome, LifecycleError> {
        let mut staged = self.state.clone();
        let outcome = staged
            .apply(&operation)
            .map_err(|e| LifecycleError::new(phase, step, e))?;

        let transaction = Transaction::sign(operation, self.nonce, self.wallets.keypair(role))
            .map_err(|e| LifecycleError::new(phase, step, e))?;
        self.nonce += 1;
        tracing::debug!(
            %phase,
            step,
            operation = transaction.operation.name(),
            nonce = transaction.nonce,
            signer = %transaction.signer_identity(),
            "submitting transaction"
        );

        let confirmation = self
            .client
            .submit(transaction)
            .await
            .map_err(|e| LifecycleError::new(phase, step, e))?;

        self.state = staged;
        self.confirmations.push(StepConfirmation {
            phase,
            step,
            confirmation,
        });
        tracing::info!(%phase, step, %confirmation, "step confirmed");
        Ok(outcome)
    }

    /// Compare the ledger's view of the mint and both accounts with local state.
    async fn verify(&self, phase: Phase) -> Result<(), LifecycleError> {
        const STEP: &str = "verify ledger state";
        let fetched = tokio::try_join!(
            self.client.query_mint(&self.mint),
            self.client.query_account(&self.team_account),
            self.client.query_account(&self.user_account),
        );
        let (mint, team, user) = fetched.map_err(|e| LifecycleError::new(phase, STEP, e))?;

        let local = |e: StateError| LifecycleError::new(phase, STEP, TokenError::from(e));
        let expected_mint = MintSnapshot::from(self.state.mint(&self.mint).map_err(local)?);
        let expected_team =
            AccountSnapshot::from(self.state.account(&self.team_account).map_err(local)?);
        let expected_user =
            AccountSnapshot::from(self.state.account(&self.user_account).map_err(local)?);

        diverged("mint", &expected_mint, &mint)
            .or_else(|| diverged("team account", &expected_team, &team))
            .or_else(|| diverged("user account", &expected_user, &user))
            .map_or(Ok(()), |detail| {
                Err(LifecycleError::new(phase, STEP, LifecycleFailure::Diverged(detail)))
            })
    }

    async fn log_wallets(&self) -> Result<(), LifecycleError> {
        let a = self.wallets.identity(Role::AuthorityA);
        let b = self.wallets.identity(Role::AuthorityB);
        let c = self.wallets.identity(Role::User);
        let fetched = tokio::try_join!(
            self.client.query_lamports(&a),
            self.client.query_lamports(&b),
            self.client.query_lamports(&c),
        );
        let (la, lb, lc) = fetched
            .map_err(|e| LifecycleError::new(Phase::Genesis, "query wallet balances", e))?;
        for (role, wallet, lamports) in [
            (Role::AuthorityA, a, la),
            (Role::AuthorityB, b, lb),
            (Role::User, c, lc),
        ] {
            tracing::info!(?role, %wallet, lamports, "wallet");
        }
        Ok(())
    }

    fn report(&self) -> Result<LifecycleReport, StateError> {
        let mint = self.state.mint(&self.mint)?;
        Ok(LifecycleReport {
            mint: self.mint,
            decimals: mint.decimals,
            team_account: self.team_account,
            user_account: self.user_account,
            team_balance: self.state.account(&self.team_account)?.balance,
            user_balance: self.state.account(&self.user_account)?.balance,
            supply: mint.total_supply,
            mint_authority: mint.mint_authority,
            freeze_authority: mint.freeze_authority,
            confirmations: self.confirmations.clone(),
        })
    }
}

fn diverged<T: PartialEq + std::fmt::Debug>(what: &str, expected: &T, actual: &T) -> Option<String> {
    (expected != actual).then(|| format!("{what}: expected {expected:?}, ledger reports {actual:?}"))
}
