//! System instruction for the driver assistant
//!
//! The whole stop list of the selected cell goes into the instruction as
//! JSON; the query itself is sent as the only user turn.

use buspro_domain::model::Stop;

const ASSISTANT_NAME: &str = "BusPro Assistant";

/// Reply the model is told to give for anything outside the list
pub const NOT_IN_LIST_REPLY: &str = "I don't have that info in your current route list.";

/// Build the system instruction for one question about the current cell
pub fn build_driver_context(stops: &[Stop], route_label: &str, direction_label: &str) -> String {
    let student_list = serde_json::to_string(stops).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"You are '{name}', a tool for a school bus driver.
Current Context: {route} - {direction}.
Student List: {students}

Instructions:
1. Help the driver find information in their list quickly.
2. Answer questions about addresses, parent names, or notes.
3. Keep answers extremely short and professional (1-2 sentences).
4. If asked about something not in the list, say "{not_in_list}"
5. The driver is working; do not use flowery language.
"#,
        name = ASSISTANT_NAME,
        route = route_label,
        direction = direction_label,
        students = student_list,
        not_in_list = NOT_IN_LIST_REPLY,
    )
}
