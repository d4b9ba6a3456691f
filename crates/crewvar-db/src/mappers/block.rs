//! Block entity <-> model mapper

use crewvar_core::traits::Block;
use crewvar_core::value_objects::UserId;

use crate::models::BlockModel;

/// Convert BlockModel to Block
impl From<BlockModel> for Block {
    fn from(model: BlockModel) -> Self {
        Block {
            blocker_id: UserId::new(model.blocker_id),
            blocked_id: UserId::new(model.blocked_id),
            created_at: model.created_at,
        }
    }
}
