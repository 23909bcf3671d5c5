//! MultiDAOTreasury event kinds and their field-mapping table.
//!
//! Every event maps to exactly one entity kind with the same name. The
//! entity's domain fields are the event parameters listed here, in order.

use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// Storage type of a mapped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// uint256
    BigInt,
    /// uint8 / int32
    Int,
    String,
    /// address
    Bytes,
}

/// One row of the field-mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

use FieldKind::{BigInt, Bytes, Int, String as Str};

const DAO_CREATED: &[FieldSpec] = &[
    field("daoId", BigInt),
    field("name", Str),
    field("owner", Bytes),
];
const FUNDS_DEPOSITED: &[FieldSpec] = &[
    field("daoId", BigInt),
    field("member", Bytes),
    field("amount", BigInt),
];
const FUNDS_TRANSFERRED: &[FieldSpec] = &[
    field("daoId", BigInt),
    field("recipient", Bytes),
    field("amount", BigInt),
];
const INTERNAL_TRANSFER: &[FieldSpec] = &[
    field("daoId", BigInt),
    field("from", Bytes),
    field("to", Bytes),
    field("amount", BigInt),
];
/// Shared by the four loan lifecycle events.
const LOAN: &[FieldSpec] = &[
    field("daoId", BigInt),
    field("member", Bytes),
    field("amount", BigInt),
];
const MEMBER_JOINED_DAO: &[FieldSpec] = &[field("daoId", BigInt), field("member", Bytes)];
const OWNERSHIP_TRANSFERRED: &[FieldSpec] = &[
    field("previousOwner", Bytes),
    field("newOwner", Bytes),
];
const PROPOSAL_CREATED: &[FieldSpec] = &[
    field("daoId", BigInt),
    field("proposer", Bytes),
    field("amount", BigInt),
    field("description", Str),
    field("proposalType", Int),
];
const PROPOSAL_EXECUTED: &[FieldSpec] = &[
    field("daoId", BigInt),
    field("proposalId", BigInt),
    field("amount", BigInt),
];
const PROPOSAL_VOTE_CAST: &[FieldSpec] = &[
    field("daoId", BigInt),
    field("voter", Bytes),
    field("proposalId", BigInt),
    field("votes", BigInt),
];
const SIGNATORY_ADDED: &[FieldSpec] = &[field("daoId", BigInt), field("newSignatory", Bytes)];
const SIGNATORY_REMOVED: &[FieldSpec] = &[field("daoId", BigInt), field("signatory", Bytes)];
const VOTE_CAST: &[FieldSpec] = &[
    field("daoId", BigInt),
    field("voter", Bytes),
    field("borrower", Bytes),
    field("loanRequestId", BigInt),
    field("votes", BigInt),
];

/// Events emitted by the MultiDAOTreasury contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    DaoCreated,
    FundsDeposited,
    FundsTransferred,
    InternalTransfer,
    LoanApproved,
    LoanDisbursed,
    LoanRepaid,
    LoanRequested,
    MemberJoinedDao,
    OwnershipTransferred,
    ProposalCreated,
    ProposalExecuted,
    ProposalVoteCast,
    SignatoryAdded,
    SignatoryRemoved,
    VoteCast,
}

impl EventKind {
    pub const ALL: [EventKind; 16] = [
        EventKind::DaoCreated,
        EventKind::FundsDeposited,
        EventKind::FundsTransferred,
        EventKind::InternalTransfer,
        EventKind::LoanApproved,
        EventKind::LoanDisbursed,
        EventKind::LoanRepaid,
        EventKind::LoanRequested,
        EventKind::MemberJoinedDao,
        EventKind::OwnershipTransferred,
        EventKind::ProposalCreated,
        EventKind::ProposalExecuted,
        EventKind::ProposalVoteCast,
        EventKind::SignatoryAdded,
        EventKind::SignatoryRemoved,
        EventKind::VoteCast,
    ];

    /// Event name as emitted by the contract. Also the entity name.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::DaoCreated => "DAOCreated",
            EventKind::FundsDeposited => "FundsDeposited",
            EventKind::FundsTransferred => "FundsTransferred",
            EventKind::InternalTransfer => "InternalTransfer",
            EventKind::LoanApproved => "LoanApproved",
            EventKind::LoanDisbursed => "LoanDisbursed",
            EventKind::LoanRepaid => "LoanRepaid",
            EventKind::LoanRequested => "LoanRequested",
            EventKind::MemberJoinedDao => "MemberJoinedDAO",
            EventKind::OwnershipTransferred => "OwnershipTransferred",
            EventKind::ProposalCreated => "ProposalCreated",
            EventKind::ProposalExecuted => "ProposalExecuted",
            EventKind::ProposalVoteCast => "ProposalVoteCast",
            EventKind::SignatoryAdded => "SignatoryAdded",
            EventKind::SignatoryRemoved => "SignatoryRemoved",
            EventKind::VoteCast => "VoteCast",
        }
    }

    /// Plural collection name used by the query surface.
    pub fn collection(self) -> &'static str {
        match self {
            EventKind::DaoCreated => "daocreateds",
            EventKind::FundsDeposited => "fundsDepositeds",
            EventKind::FundsTransferred => "fundsTransferreds",
            EventKind::InternalTransfer => "internalTransfers",
            EventKind::LoanApproved => "loanApproveds",
            EventKind::LoanDisbursed => "loanDisburseds",
            EventKind::LoanRepaid => "loanRepaids",
            EventKind::LoanRequested => "loanRequesteds",
            EventKind::MemberJoinedDao => "memberJoinedDAOs",
            EventKind::OwnershipTransferred => "ownershipTransferreds",
            EventKind::ProposalCreated => "proposalCreateds",
            EventKind::ProposalExecuted => "proposalExecuteds",
            EventKind::ProposalVoteCast => "proposalVoteCasts",
            EventKind::SignatoryAdded => "signatoryAddeds",
            EventKind::SignatoryRemoved => "signatoryRemoveds",
            EventKind::VoteCast => "voteCasts",
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            EventKind::DaoCreated => DAO_CREATED,
            EventKind::FundsDeposited => FUNDS_DEPOSITED,
            EventKind::FundsTransferred => FUNDS_TRANSFERRED,
            EventKind::InternalTransfer => INTERNAL_TRANSFER,
            EventKind::LoanApproved
            | EventKind::LoanDisbursed
            | EventKind::LoanRepaid
            | EventKind::LoanRequested => LOAN,
            EventKind::MemberJoinedDao => MEMBER_JOINED_DAO,
            EventKind::OwnershipTransferred => OWNERSHIP_TRANSFERRED,
            EventKind::ProposalCreated => PROPOSAL_CREATED,
            EventKind::ProposalExecuted => PROPOSAL_EXECUTED,
            EventKind::ProposalVoteCast => PROPOSAL_VOTE_CAST,
            EventKind::SignatoryAdded => SIGNATORY_ADDED,
            EventKind::SignatoryRemoved => SIGNATORY_REMOVED,
            EventKind::VoteCast => VOTE_CAST,
        }
    }

    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Whether entities of this kind carry a `daoId` field.
    pub fn is_dao_scoped(self) -> bool {
        self.field("daoId").is_some()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn from_collection(collection: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.collection() == collection)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| TypesError::UnknownEvent(s.to_string()))
    }
}
