//! Partnership allocation engine.
//!
//! Assets are owned by one user and can be shared with other users through
//! invitations. Every revenue or cost recorded on an asset is split among its
//! active partners at creation time, and the split is frozen from then on.

pub use allocation::Allocation;
pub use assets::Asset;
pub use asset_partnerships::Partnership;
pub use commands::{CostCmd, InvitationCmd, NewAssetCmd, RevenueCmd};
pub use error::{EngineError, ErrorKind};
pub use money::{MAX_AMOUNT_MINOR, MoneyCents};
pub use ops::{Engine, EngineBuilder};
pub use partnership_invitations::{
    INVITATION_TTL_DAYS, Invitation, InvitationAction, InvitationResponse, InvitationStatus,
};
pub use reports::{
    AllocationRecord, AssetPartnerships, AssetPosition, PartnershipDetails, UserPosition,
};
pub use share::{FULL_SHARE, SHARE_EPSILON};
pub use transactions::{Transaction, TransactionKind};

mod allocation;
mod asset_partnerships;
mod assets;
mod banks;
mod commands;
mod companies;
mod cost_attributions;
mod costs;
mod error;
mod money;
mod ops;
mod partnership_invitations;
mod reports;
mod revenue_shares;
mod revenues;
mod share;
mod transactions;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
