// Client portfolio service — add/update/remove clients and raise invoices.
// Invoices reference clients by name only (weak reference), matching the
// rest of the console's value-matched collections.

use chrono::{DateTime, Months, Utc};
use serde::Deserialize;

use crate::error::CoreError;
use crate::state::AppState;
use crate::types::{Client, Invoice, InvoiceStatus, Plan};
use crate::util::{format_currency, validate_bounded_string, validate_positive_amount};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClientRequest {
    pub name: String,
    pub plan: Plan,
    pub mrr: f64,
}

/// Onboard a new client at the front of the portfolio.
///
/// New clients start with perfect health, zero NPS/usage, and a renewal one
/// year out.
pub fn add_client(state: &AppState, request: NewClientRequest) -> Result<Client, CoreError> {
    let name = validate_bounded_string(&request.name, "name", 1, 120)?;
    let mrr = validate_positive_amount(request.mrr, "mrr")?;

    let today = Utc::now().date_naive();
    let client = Client {
        id: state.allocate_id(),
        name,
        plan: request.plan,
        mrr,
        health: 100,
        nps: 0,
        renewal: today.checked_add_months(Months::new(12)).unwrap_or(today),
        usage: 0,
    };

    let mut clients = state.clients.lock().map_err(|_| CoreError::LockPoisoned)?;
    clients.insert(0, client.clone());
    log::info!("client '{}' added at {}/mo", client.name, format_currency(client.mrr));
    Ok(client)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub plan: Option<Plan>,
    #[serde(default)]
    pub mrr: Option<f64>,
}

/// Update a client's editable fields.
pub fn update_client(state: &AppState, request: UpdateClientRequest) -> Result<Client, CoreError> {
    let name = match &request.name {
        Some(value) => Some(validate_bounded_string(value, "name", 1, 120)?),
        None => None,
    };
    let mrr = match request.mrr {
        Some(value) => Some(validate_positive_amount(value, "mrr")?),
        None => None,
    };

    let mut clients = state.clients.lock().map_err(|_| CoreError::LockPoisoned)?;
    let client = clients
        .iter_mut()
        .find(|c| c.id == request.id)
        .ok_or(CoreError::ClientNotFound(request.id))?;

    if let Some(name) = name {
        client.name = name;
    }
    if let Some(plan) = request.plan {
        client.plan = plan;
    }
    if let Some(mrr) = mrr {
        client.mrr = mrr;
    }
    Ok(client.clone())
}

/// Remove a client from the portfolio.
pub fn delete_client(state: &AppState, id: u64) -> Result<(), CoreError> {
    let mut clients = state.clients.lock().map_err(|_| CoreError::LockPoisoned)?;
    let before = clients.len();
    clients.retain(|c| c.id != id);
    if clients.len() == before {
        return Err(CoreError::ClientNotFound(id));
    }
    log::info!("client {id} removed from portfolio");
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub client_name: String,
    pub amount: f64,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Raise a new invoice for an existing portfolio client.
///
/// New invoices start `Pending` and are inserted at the front of the list.
pub fn create_invoice(
    state: &AppState,
    request: CreateInvoiceRequest,
) -> Result<Invoice, CoreError> {
    let client_name = validate_bounded_string(&request.client_name, "clientName", 1, 120)?;
    let amount = validate_positive_amount(request.amount, "amount")?;
    let description = match &request.description {
        Some(value) => validate_bounded_string(value, "description", 1, 500)?,
        None => String::new(),
    };

    {
        let clients = state.clients.lock().map_err(|_| CoreError::LockPoisoned)?;
        if !clients.iter().any(|c| c.name == client_name) {
            return Err(CoreError::UnknownClientName(client_name));
        }
    }

    let invoice = Invoice {
        id: state.allocate_id(),
        client_name,
        amount,
        due_date: request.due_date,
        status: InvoiceStatus::Pending,
        description,
    };

    let mut invoices = state.invoices.lock().map_err(|_| CoreError::LockPoisoned)?;
    invoices.insert(0, invoice.clone());
    log::info!(
        "invoice {} raised for '{}' ({})",
        invoice.id,
        invoice.client_name,
        format_currency(invoice.amount)
    );
    Ok(invoice)
}
