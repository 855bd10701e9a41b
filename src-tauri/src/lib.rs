use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use banquet_core::state::SeatingState;
use banquet_core::{Guest, GuestCategory, SuggestSettings, Table, TableShape, Variant};
use serde::Serialize;

/// Managed state wrapping the live seating chart.
struct ChartState(Arc<Mutex<SeatingState>>);

/// Managed state wrapping the suggestion-provider settings.
struct SettingsState(Arc<Mutex<SuggestSettings>>);

/// Wire view of the live chart for the frontend.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartView {
    guests: Vec<Guest>,
    tables: Vec<Table>,
    assignments: banquet_core::Assignments,
    active_variant: Option<String>,
}

fn view_of(state: &SeatingState) -> ChartView {
    ChartView {
        guests: state.guests.clone(),
        tables: state.tables.clone(),
        assignments: state.assignments.clone(),
        active_variant: state.active_variant.clone(),
    }
}

fn parse_category(category: &str) -> Result<GuestCategory, String> {
    category.parse()
}

// --- Chart ---

#[tauri::command]
fn read_chart(state: tauri::State<'_, ChartState>) -> Result<ChartView, String> {
    let chart = state.0.lock().unwrap();
    Ok(view_of(&chart))
}

// --- Guests ---

#[tauri::command]
fn add_guest(name: String, category: String, state: tauri::State<'_, ChartState>) -> Result<(), String> {
    let category = parse_category(&category)?;
    let mut chart = state.0.lock().unwrap();
    chart.add_guest(&name, category);
    banquet_core::write_roster(&chart.guests)
}

#[tauri::command]
fn import_guests(category: String, text: String, state: tauri::State<'_, ChartState>) -> Result<(), String> {
    let category = parse_category(&category)?;
    let mut chart = state.0.lock().unwrap();
    chart.import_guests(category, &text);
    banquet_core::write_roster(&chart.guests)
}

#[tauri::command]
fn rename_guest(id: String, name: String, state: tauri::State<'_, ChartState>) -> Result<(), String> {
    let mut chart = state.0.lock().unwrap();
    chart.rename_guest(&id, &name);
    banquet_core::write_roster(&chart.guests)
}

#[tauri::command]
fn remove_guest(id: String, state: tauri::State<'_, ChartState>) -> Result<(), String> {
    let mut chart = state.0.lock().unwrap();
    chart.remove_guest(&id);
    banquet_core::write_roster(&chart.guests)
}

#[tauri::command]
fn unassigned_guests(state: tauri::State<'_, ChartState>) -> Result<Vec<Guest>, String> {
    let chart = state.0.lock().unwrap();
    Ok(chart.unassigned_guests().into_iter().cloned().collect())
}

// --- Tables ---

#[tauri::command]
fn add_table(shape: String, capacity: u32, state: tauri::State<'_, ChartState>) -> Result<(), String> {
    let shape: TableShape = shape.parse()?;
    let mut chart = state.0.lock().unwrap();
    chart.add_table(shape, capacity);
    Ok(())
}

#[tauri::command]
fn remove_table(id: String, state: tauri::State<'_, ChartState>) -> Result<(), String> {
    let mut chart = state.0.lock().unwrap();
    chart.remove_table(&id);
    Ok(())
}

#[tauri::command]
fn generate_tables(state: tauri::State<'_, ChartState>) -> Result<(), String> {
    let mut chart = state.0.lock().unwrap();
    let count = chart.guests.len() as u32;
    chart.generate_tables(count);
    Ok(())
}

// --- Assignments ---

#[tauri::command]
fn assign_guest(
    table_id: String,
    guest_id: String,
    seat: String,
    state: tauri::State<'_, ChartState>,
) -> Result<(), String> {
    let mut chart = state.0.lock().unwrap();
    chart.assign(&table_id, &guest_id, &seat);
    Ok(())
}

#[tauri::command]
fn unassign_seat(table_id: String, seat: String, state: tauri::State<'_, ChartState>) -> Result<(), String> {
    let mut chart = state.0.lock().unwrap();
    chart.unassign(&table_id, &seat);
    Ok(())
}

#[tauri::command]
fn seated_guests(table_id: String, state: tauri::State<'_, ChartState>) -> Result<HashMap<String, Guest>, String> {
    let chart = state.0.lock().unwrap();
    Ok(chart
        .seated_guests(&table_id)
        .into_iter()
        .map(|(seat, guest)| (seat, guest.clone()))
        .collect())
}

// --- Variants ---

#[tauri::command]
fn list_variants() -> Result<Vec<String>, String> {
    Ok(banquet_core::list_variants())
}

#[tauri::command]
fn save_variant(name: String, state: tauri::State<'_, ChartState>) -> Result<(), String> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Ok(());
    }
    let mut chart = state.0.lock().unwrap();
    let variant = chart.snapshot(&name);
    banquet_core::write_variant(&variant)?;
    chart.active_variant = Some(name);
    Ok(())
}

/// Load a saved variant into the live chart. The empty name is the
/// "no selection" sentinel and clears the layout instead.
#[tauri::command]
fn load_variant(name: String, state: tauri::State<'_, ChartState>) -> Result<(), String> {
    let mut chart = state.0.lock().unwrap();
    if name.is_empty() {
        chart.clear_layout();
        return Ok(());
    }
    let variant = banquet_core::read_variant(&name)?;
    chart.restore(&variant);
    Ok(())
}

#[tauri::command]
fn delete_variant(name: String, state: tauri::State<'_, ChartState>) -> Result<(), String> {
    banquet_core::delete_variant(&name)?;
    let mut chart = state.0.lock().unwrap();
    if chart.active_variant.as_deref() == Some(name.as_str()) {
        chart.active_variant = None;
    }
    Ok(())
}

// --- Sharing ---

#[tauri::command]
fn export_variant(name: String) -> Result<String, String> {
    let variant = banquet_core::read_variant(&name)?;
    Ok(banquet_core::share::export_variant(&variant))
}

/// Validate and store a shared payload as a saved variant. A rejected payload
/// changes nothing.
#[tauri::command]
fn import_variant(payload: String) -> Result<String, String> {
    let variant: Variant = banquet_core::share::import_variant(&payload)?;
    banquet_core::write_variant(&variant)?;
    Ok(variant.name)
}

// --- Settings ---

#[tauri::command]
fn get_suggest_settings(state: tauri::State<'_, SettingsState>) -> Result<serde_json::Value, String> {
    let settings = state.0.lock().unwrap().clone();
    let configured = banquet_core::suggest_configured(&settings);
    // Mask API key — only send whether it's set
    Ok(serde_json::json!({
        "provider": settings.provider,
        "model": settings.model,
        "hasKey": !settings.api_key.is_empty(),
        "configured": configured,
    }))
}

#[tauri::command]
fn save_suggest_settings(
    provider: String,
    api_key: String,
    model: String,
    state: tauri::State<'_, SettingsState>,
) -> Result<(), String> {
    let mut settings = state.0.lock().unwrap();
    settings.provider = provider;
    settings.model = model;
    // Empty key means "keep existing"
    if !api_key.is_empty() {
        settings.api_key = api_key;
    }
    banquet_core::write_settings(&settings)
}

// --- Auto-assign ---

/// Ask the suggestion service to lay out the currently unassigned guests.
/// The chart lock is not held across the call; edits made while the request
/// is in flight are simply overwritten when the proposal lands (wholesale
/// replace, last-writer-wins). On failure the chart is untouched.
#[tauri::command]
async fn auto_assign(
    chart_state: tauri::State<'_, ChartState>,
    settings_state: tauri::State<'_, SettingsState>,
) -> Result<ChartView, String> {
    let settings = settings_state.0.lock().unwrap().clone();
    if !banquet_core::suggest_configured(&settings) {
        return Err("suggestion provider is not configured".to_string());
    }

    let guests: Vec<Guest> = {
        let chart = chart_state.0.lock().unwrap();
        chart.unassigned_guests().into_iter().cloned().collect()
    };
    if guests.is_empty() {
        return Err("no unassigned guests to place".to_string());
    }

    let outcome = banquet_suggest::propose(&guests, &settings).await;

    let mut chart = chart_state.0.lock().unwrap();
    chart.apply_outcome(outcome)?;
    Ok(view_of(&chart))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let mut chart = SeatingState::new();
    chart.guests = banquet_core::read_roster();
    let settings = banquet_core::read_settings();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(ChartState(Arc::new(Mutex::new(chart))))
        .manage(SettingsState(Arc::new(Mutex::new(settings))))
        .invoke_handler(tauri::generate_handler![
            read_chart,
            add_guest,
            import_guests,
            rename_guest,
            remove_guest,
            unassigned_guests,
            add_table,
            remove_table,
            generate_tables,
            assign_guest,
            unassign_seat,
            seated_guests,
            list_variants,
            save_variant,
            load_variant,
            delete_variant,
            export_variant,
            import_variant,
            get_suggest_settings,
            save_suggest_settings,
            auto_assign,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
