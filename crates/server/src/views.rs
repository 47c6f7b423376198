//! Conversions from engine records to the JSON views.

use api_types::{
    asset::AssetView,
    invitation::{self, InvitationResponseView, InvitationView},
    partnership::{AllocationRecordView, PartnershipView},
    position::{AssetPositionView, UserPositionResponse},
    transaction::{self, AllocationView, TransactionView},
};
use engine::{
    AllocationRecord, Asset, Invitation, InvitationResponse, InvitationStatus, Partnership,
    Transaction, TransactionKind, UserPosition,
};

pub fn asset(asset: Asset) -> AssetView {
    AssetView {
        id: asset.id,
        name: asset.name,
        kind: asset.kind,
        value_minor: asset.value_minor,
        company_id: asset.company_id,
        bank_id: asset.bank_id,
        owner_id: asset.owner_id,
        created_at: asset.created_at,
    }
}

pub fn partnership(partnership: Partnership) -> PartnershipView {
    PartnershipView {
        user_id: partnership.user_id,
        share_percentage: partnership.share_percentage,
        is_active: partnership.is_active,
        joined_at: partnership.joined_at,
        left_at: partnership.left_at,
    }
}

pub fn allocation_record(record: AllocationRecord) -> AllocationRecordView {
    AllocationRecordView {
        transaction_id: record.transaction_id,
        amount_minor: record.amount_minor,
        percentage: record.percentage,
        created_at: record.created_at,
    }
}

fn invitation_status(status: InvitationStatus) -> invitation::InvitationStatus {
    match status {
        InvitationStatus::Pending => invitation::InvitationStatus::Pending,
        InvitationStatus::Accepted => invitation::InvitationStatus::Accepted,
        InvitationStatus::Rejected => invitation::InvitationStatus::Rejected,
        InvitationStatus::Expired => invitation::InvitationStatus::Expired,
    }
}

pub fn invitation(invitation: Invitation) -> InvitationView {
    InvitationView {
        id: invitation.id,
        asset_id: invitation.asset_id,
        sender_id: invitation.sender_id,
        receiver_id: invitation.receiver_id,
        share_percentage: invitation.share_percentage,
        message: invitation.message,
        status: invitation_status(invitation.status),
        status_reason: invitation.status_reason,
        created_at: invitation.created_at,
        expires_at: invitation.expires_at,
        responded_at: invitation.responded_at,
    }
}

pub fn invitation_response(response: InvitationResponse) -> InvitationResponseView {
    InvitationResponseView {
        invitation: invitation(response.invitation),
        partnership: response.partnership.map(partnership),
    }
}

pub fn transaction(tx: Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        kind: match tx.kind {
            TransactionKind::Revenue => transaction::TransactionKind::Revenue,
            TransactionKind::Cost => transaction::TransactionKind::Cost,
        },
        asset_id: tx.asset_id,
        amount_minor: tx.amount_minor,
        label: tx.label,
        note: tx.note,
        occurred_at: tx.occurred_at,
        recorder_id: tx.recorder_id,
        allocations: tx
            .allocations
            .into_iter()
            .map(|a| AllocationView {
                user_id: a.user_id,
                amount_minor: a.amount_minor,
                percentage: a.percentage,
            })
            .collect(),
    }
}

pub fn user_position(position: UserPosition) -> UserPositionResponse {
    UserPositionResponse {
        user_id: position.user_id,
        assets: position
            .assets
            .into_iter()
            .map(|a| AssetPositionView {
                asset_id: a.asset_id,
                total_revenue_minor: a.total_revenue_minor,
                total_cost_minor: a.total_cost_minor,
                net_minor: a.net_minor,
            })
            .collect(),
        total_revenue_minor: position.total_revenue_minor,
        total_cost_minor: position.total_cost_minor,
        net_minor: position.net_minor,
    }
}
