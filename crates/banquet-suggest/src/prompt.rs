use banquet_core::Guest;

pub fn system_prompt() -> String {
    "You are a seating arrangement planner for events. Given a guest list, you \
design tables and assign every guest to a seat. Respond with a single JSON \
object with two properties: \"tables\" (an array of table objects, each with \
\"id\", \"shape\" — \"circle\" or \"rectangle\" — and \"capacity\") and \
\"assignments\" (an object mapping table IDs to arrays of guest IDs, in seat \
order). Output ONLY the JSON object, nothing else."
        .to_string()
}

/// Build the user message: the layout rules plus the guest list as JSON.
/// The guest list keeps roster order so the model sees parties together.
pub fn user_message(guests: &[Guest]) -> Result<String, String> {
    let guest_json =
        serde_json::to_string(guests).map_err(|e| format!("serialize guests: {e}"))?;

    Ok(format!(
        "Generate a seating arrangement for {count} guests and assign ALL of them to tables. \
Follow these rules strictly:\n\
1. Circle tables seat at most 8, rectangle tables at most 20.\n\
2. Create enough tables to seat ALL guests. No guest may be left unassigned.\n\
3. Keep guests sharing a \"group\" value at the same table.\n\
4. Seat guests of the same category together when feasible; the friend \
categories (bride, groom, common) may mix.\n\
5. Prefer keeping groups and categories together over filling tables completely.\n\
6. Never assign the same guest to more than one table.\n\n\
Guests: {guest_json}\n\n\
Return the table layout and guest assignments. Double-check that every guest \
appears exactly once before answering.",
        count = guests.len(),
    ))
}
