//! MultiDAOTreasury write requests.
//!
//! Each call is validated when built and serializes to the
//! `{"functionName": .., "args": [..]}` shape a wallet client submits.
//! Calls that act on a DAO take it from the [`DaoContext`].

use daocean_types::{parse_bytes, U256};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use serde_json::{json, Value as Json};

use crate::context::{ContextError, DaoContext};
use crate::storage::SelectionStorage;

#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("DAO name must not be empty")]
    EmptyName,
    #[error("at least one signatory is required")]
    NoSignatories,
    #[error("minimum approvals must be between 1 and {signatories}, got {min_approvals}")]
    InvalidMinApprovals { min_approvals: u64, signatories: usize },
    #[error("{0} must be greater than zero")]
    ZeroAmount(&'static str),
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ProposalType {
    Investment = 1,
    ProjectFunding = 2,
    TreasuryDiversification = 3,
    FeeAdjustment = 4,
}

impl ProposalType {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ProposalType {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, u8> {
        match code {
            1 => Ok(ProposalType::Investment),
            2 => Ok(ProposalType::ProjectFunding),
            3 => Ok(ProposalType::TreasuryDiversification),
            4 => Ok(ProposalType::FeeAdjustment),
            other => Err(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreasuryCall {
    CreateDao {
        name: String,
        signatories: Vec<String>,
        min_approvals: u64,
    },
    JoinDao {
        dao_id: U256,
    },
    DepositFunds {
        dao_id: U256,
        amount: U256,
    },
    RequestLoan {
        dao_id: U256,
        amount: U256,
    },
    ApproveLoan {
        dao_id: U256,
        borrower: String,
    },
    RepayLoan {
        dao_id: U256,
    },
    CreateProposal {
        dao_id: U256,
        proposal_type: ProposalType,
        amount: U256,
        description: String,
    },
}

/// Lowercased `0x` address of exactly 20 bytes.
fn address(text: &str) -> Result<String, CallError> {
    match parse_bytes(text) {
        Ok(bytes) if bytes.len() == 20 => Ok(text.trim().to_ascii_lowercase()),
        _ => Err(CallError::InvalidAddress(text.to_string())),
    }
}

fn non_zero(name: &'static str, amount: U256) -> Result<U256, CallError> {
    if amount.is_zero() {
        return Err(CallError::ZeroAmount(name));
    }
    Ok(amount)
}

fn selected_dao<S: SelectionStorage>(ctx: &DaoContext<S>) -> Result<U256, CallError> {
    Ok(ctx.require()?.dao_id)
}

impl TreasuryCall {
    pub fn create_dao(
        name: &str,
        signatories: &[&str],
        min_approvals: u64,
    ) -> Result<Self, CallError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CallError::EmptyName);
        }
        if signatories.is_empty() {
            return Err(CallError::NoSignatories);
        }
        if min_approvals == 0 || min_approvals > signatories.len() as u64 {
            return Err(CallError::InvalidMinApprovals {
                min_approvals,
                signatories: signatories.len(),
            });
        }
        let signatories = signatories
            .iter()
            .map(|s| address(s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TreasuryCall::CreateDao {
            name: name.to_string(),
            signatories,
            min_approvals,
        })
    }

    /// Joining picks a DAO from the listing, so it does not use the selection.
    pub fn join_dao(dao_id: impl Into<U256>) -> Self {
        TreasuryCall::JoinDao {
            dao_id: dao_id.into(),
        }
    }

    pub fn deposit_funds<S: SelectionStorage>(
        ctx: &DaoContext<S>,
        amount: U256,
    ) -> Result<Self, CallError> {
        Ok(TreasuryCall::DepositFunds {
            dao_id: selected_dao(ctx)?,
            amount: non_zero("amount", amount)?,
        })
    }

    pub fn request_loan<S: SelectionStorage>(
        ctx: &DaoContext<S>,
        amount: U256,
    ) -> Result<Self, CallError> {
        Ok(TreasuryCall::RequestLoan {
            dao_id: selected_dao(ctx)?,
            amount: non_zero("amount", amount)?,
        })
    }

    pub fn approve_loan<S: SelectionStorage>(
        ctx: &DaoContext<S>,
        borrower: &str,
    ) -> Result<Self, CallError> {
        Ok(TreasuryCall::ApproveLoan {
            dao_id: selected_dao(ctx)?,
            borrower: address(borrower)?,
        })
    }

    pub fn repay_loan<S: SelectionStorage>(ctx: &DaoContext<S>) -> Result<Self, CallError> {
        Ok(TreasuryCall::RepayLoan {
            dao_id: selected_dao(ctx)?,
        })
    }

    pub fn create_proposal<S: SelectionStorage>(
        ctx: &DaoContext<S>,
        proposal_type: ProposalType,
        amount: U256,
        description: &str,
    ) -> Result<Self, CallError> {
        Ok(TreasuryCall::CreateProposal {
            dao_id: selected_dao(ctx)?,
            proposal_type,
            amount: non_zero("amount", amount)?,
            description: description.to_string(),
        })
    }

    pub fn function_name(&self) -> &'static str {
        match self {
            TreasuryCall::CreateDao { .. } => "createDAO",
            TreasuryCall::JoinDao { .. } => "joinDAO",
            TreasuryCall::DepositFunds { .. } => "depositFunds",
            TreasuryCall::RequestLoan { .. } => "requestLoan",
            TreasuryCall::ApproveLoan { .. } => "approveLoan",
            TreasuryCall::RepayLoan { .. } => "repayLoan",
            TreasuryCall::CreateProposal { .. } => "createProposal",
        }
    }

    /// Positional ABI arguments. uint256 values are decimal strings.
    pub fn args(&self) -> Vec<Json> {
        let dec = |v: &U256| Json::String(v.to_string());
        match self {
            TreasuryCall::CreateDao {
                name,
                signatories,
                min_approvals,
            } => vec![json!(name), json!(signatories), json!(min_approvals.to_string())],
            TreasuryCall::JoinDao { dao_id } | TreasuryCall::RepayLoan { dao_id } => {
                vec![dec(dao_id)]
            }
            TreasuryCall::DepositFunds { dao_id, amount }
            | TreasuryCall::RequestLoan { dao_id, amount } => vec![dec(dao_id), dec(amount)],
            TreasuryCall::ApproveLoan { dao_id, borrower } => vec![dec(dao_id), json!(borrower)],
            TreasuryCall::CreateProposal {
                dao_id,
                proposal_type,
                amount,
                description,
            } => vec![
                dec(dao_id),
                json!(proposal_type.code()),
                dec(amount),
                json!(description),
            ],
        }
    }
}

impl Serialize for TreasuryCall {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TreasuryCall", 2)?;
        state.serialize_field("functionName", self.function_name())?;
        state.serialize_field("args", &self.args())?;
        state.end()
    }
}
