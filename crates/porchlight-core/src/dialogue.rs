//! Per-session leasing conversation: slot-filling intake, then matching
//! and booking.

use chrono::{Local, NaiveDate};
use log::{info, warn};
use rand::seq::IndexedRandom;

use crate::error::DeskError;
use crate::intake;
use crate::inventory::Inventory;
use crate::notify::{Confirmation, ConfirmationNotifier};

/// Fields collected from a prospect before matching.
#[derive(Debug, Default, Clone)]
struct ProspectDraft {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    move_in: Option<NaiveDate>,
    beds: Option<u32>,
}

/// Where a conversation currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Greeting,
    AskName,
    AskEmail,
    AskPhone,
    AskMoveIn,
    AskBeds,
    Closed { booked: bool },
}

/// One prospect's dialogue state. Replies are fixed per stage so the flow
/// stays deterministic.
pub(crate) struct Conversation {
    stage: Stage,
    draft: ProspectDraft,
}

impl Conversation {
    pub(crate) fn new() -> Self {
        Self {
            stage: Stage::Greeting,
            draft: ProspectDraft::default(),
        }
    }

    /// Advance the dialogue with one inbound message and produce the reply.
    pub(crate) fn advance(
        &mut self,
        message: &str,
        inventory: &Inventory,
        notifier: &dyn ConfirmationNotifier,
    ) -> Result<String, DeskError> {
        let answer = message.trim();
        let reply = match self.stage {
            // The first message is a door-opener; intake starts at the name.
            Stage::Greeting => {
                self.stage = Stage::AskName;
                "Hi! I'm the Porchlight leasing assistant. I can help you find a place \
                 and schedule a tour. What's your name?"
                    .to_string()
            }
            Stage::AskName => {
                if answer.is_empty() {
                    "Sorry, I didn't catch that. What's your name?".to_string()
                } else {
                    self.draft.name = Some(answer.to_string());
                    self.stage = Stage::AskEmail;
                    format!("Nice to meet you, {answer}! What's the best email to reach you at?")
                }
            }
            Stage::AskEmail => match intake::validate_email(answer) {
                Ok(email) => {
                    self.draft.email = Some(email);
                    self.stage = Stage::AskPhone;
                    "Got it. And a phone number?".to_string()
                }
                Err(reason) => {
                    format!("Sorry, {reason}. What's the best email to reach you at?")
                }
            },
            Stage::AskPhone => match intake::validate_phone(answer) {
                Ok(phone) => {
                    self.draft.phone = Some(phone);
                    self.stage = Stage::AskMoveIn;
                    "Thanks. When are you hoping to move in?".to_string()
                }
                Err(reason) => format!("Sorry, {reason}. What's a good phone number?"),
            },
            Stage::AskMoveIn => {
                match intake::validate_move_in(answer, Local::now().date_naive()) {
                    Ok(date) => {
                        self.draft.move_in = Some(date);
                        self.stage = Stage::AskBeds;
                        "Great. How many bedrooms are you looking for?".to_string()
                    }
                    Err(reason) => format!("Sorry, {reason}. When are you hoping to move in?"),
                }
            }
            Stage::AskBeds => match intake::validate_beds(answer) {
                Ok(beds) => {
                    self.draft.beds = Some(beds);
                    self.match_and_book(beds, inventory, notifier)?
                }
                Err(reason) => {
                    format!("Sorry, {reason}. How many bedrooms are you looking for?")
                }
            },
            Stage::Closed { booked: true } => {
                "You're all set for your tour! If anything changes, just reach out to \
                 the leasing office."
                    .to_string()
            }
            Stage::Closed { booked: false } => {
                "Nothing new on our end yet. Please check back later!".to_string()
            }
        };
        Ok(reply)
    }

    /// Intake is complete: store the prospect, pick a property, book the
    /// earliest open slot, and send the confirmation.
    fn match_and_book(
        &mut self,
        beds: u32,
        inventory: &Inventory,
        notifier: &dyn ConfirmationNotifier,
    ) -> Result<String, DeskError> {
        let (Some(name), Some(email), Some(phone)) = (
            self.draft.name.clone(),
            self.draft.email.clone(),
            self.draft.phone.clone(),
        ) else {
            // Stages fill these in order; missing ones mean corrupted state.
            self.stage = Stage::Closed { booked: false };
            return Ok(
                "Sorry, something went wrong on our end. Please start a new chat.".to_string(),
            );
        };

        let user_id = inventory.find_or_create_prospect(&name, &email, &phone)?;
        let move_in = self.draft.move_in.map(|d| d.to_string()).unwrap_or_default();
        info!(
            "intake complete (user_id={}, email={}, move_in={}, beds={})",
            user_id, email, move_in, beds
        );

        let matches = inventory.available_properties(beds)?;
        let Some(property) = matches.choose(&mut rand::rng()).cloned() else {
            self.stage = Stage::Closed { booked: false };
            return Ok(format!(
                "Sorry {name}, we don't have any {beds}-bedroom homes available right now. \
                 Please check back later!"
            ));
        };

        let Some(slot) = inventory.next_open_slot(property.id)? else {
            self.stage = Stage::Closed { booked: false };
            return Ok(format!(
                "Sorry, there are no open tour slots for {} right now. Please check back later!",
                property.address
            ));
        };

        let booking_id = inventory.book(user_id, property.id, slot.id)?;
        info!(
            "tour booked (booking_id={}, property_id={}, slot_id={})",
            booking_id, property.id, slot.id
        );

        let confirmation = Confirmation {
            name: name.clone(),
            email: email.clone(),
            address: property.address.clone(),
            unit: property.id,
            start_time: slot.start_time.clone(),
        };
        if let Err(err) = notifier.notify(&confirmation) {
            warn!("confirmation delivery failed (email={}): {}", email, err);
        }

        self.stage = Stage::Closed { booked: true };
        Ok(format!(
            "You're booked, {name}! Here are the details:\n\nProperty: {address}\nTime: {start}\
             \n\nA confirmation is on its way to {email}. See you there!",
            address = property.address,
            start = slot.start_time,
        ))
    }
}
