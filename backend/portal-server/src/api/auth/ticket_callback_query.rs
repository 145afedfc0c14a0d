use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TicketCallbackQuery {
    pub ticket: Option<String>,
}
