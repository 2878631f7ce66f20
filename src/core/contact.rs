use crate::models::ContactRequest;

/// Compose the pre-filled WhatsApp message for a contact form
pub fn build_contact_message(request: &ContactRequest) -> String {
    let mut lines = vec![
        "Hello! I would like to enquire about a holiday package.".to_string(),
        format!("Name: {}", request.name.trim()),
        format!("Phone: {}", request.phone.trim()),
    ];

    if let Some(email) = non_blank(&request.email) {
        lines.push(format!("Email: {}", email));
    }
    if let Some(destination) = non_blank(&request.destination) {
        lines.push(format!("Destination: {}", destination));
    }
    if let Some(date) = non_blank(&request.travel_date) {
        lines.push(format!("Travel date: {}", date));
    }
    if let Some(travellers) = request.travellers {
        lines.push(format!("Travellers: {}", travellers));
    }
    if let Some(message) = non_blank(&request.message) {
        lines.push(format!("Message: {}", message));
    }

    lines.join("\n")
}

/// `wa.me` deep link opening a chat with `number` and `message` pre-filled
///
/// Anything but digits is dropped from the number, as wa.me expects.
pub fn whatsapp_url(number: &str, message: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    format!("https://wa.me/{}?text={}", digits, urlencoding::encode(message))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
