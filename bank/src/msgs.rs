//! Bank messages.

use serde::{Deserialize, Serialize};

use shentu_types::event::{ATTRIBUTE_KEY_MODULE, ATTRIBUTE_KEY_SENDER, EVENT_TYPE_MESSAGE};
use shentu_types::{AccAddress, Coins, Context, Event, HandlerResult};

use crate::error::BankError;
use crate::keeper::BankKeeper;

pub const EVENT_TYPE_TRANSFER: &str = "transfer";
pub const ATTRIBUTE_KEY_RECIPIENT: &str = "recipient";
pub const ATTRIBUTE_KEY_AMOUNT: &str = "amount";

/// Transfer coins between two accounts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSend {
    pub from_address: AccAddress,
    pub to_address: AccAddress,
    pub amount: Coins,
}

impl MsgSend {
    pub fn validate_basic(&self) -> Result<(), BankError> {
        self.amount.validate()?;
        Ok(())
    }
}

pub fn handle_msg_send(
    ctx: &mut Context,
    keeper: &BankKeeper,
    msg: &MsgSend,
) -> Result<HandlerResult, BankError> {
    msg.validate_basic()?;
    keeper.send(&msg.from_address, &msg.to_address, &msg.amount)?;

    ctx.events.emit(
        Event::new(EVENT_TYPE_TRANSFER)
            .with(ATTRIBUTE_KEY_RECIPIENT, msg.to_address.to_string())
            .with(ATTRIBUTE_KEY_AMOUNT, msg.amount.to_string()),
    );
    ctx.events.emit(
        Event::new(EVENT_TYPE_MESSAGE)
            .with(ATTRIBUTE_KEY_MODULE, crate::MODULE_NAME)
            .with(ATTRIBUTE_KEY_SENDER, msg.from_address.to_string()),
    );
    Ok(HandlerResult::with_events(ctx.events.events().to_vec()))
}
