// HTML rendering of the sign-up page. Plain string building; every value that
// comes from a store or from the visitor goes through `escape`.

use crate::modules::shifts::core::shift::format_date;
use crate::modules::shifts::use_cases::register_volunteer::decision::DecideError;
use crate::modules::shifts::use_cases::sign_up_page::handler::{Notice, SignUpPage};
use std::fmt::Write as _;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn notice_html(notice: &Notice, require_email: bool) -> String {
    let (class, text) = match notice {
        Notice::NoShiftsAvailable => (
            "warning",
            "Al momento non ci sono turni con posti disponibili.".to_string(),
        ),
        Notice::NoShiftsThisDay => (
            "warning",
            "Nessun turno disponibile per la data selezionata.".to_string(),
        ),
        Notice::Invalid(reason) => ("error", validation_message(reason, require_email)),
        Notice::Registered { name, shift } => (
            "success",
            format!("✅ Grazie {name}! Iscrizione registrata con successo per il turno {shift}."),
        ),
        Notice::ReadError(message) => ("error", format!("⚠️ Errore Tecnico in lettura: {message}")),
        Notice::WriteError(message) => (
            "error",
            format!("Errore durante l'invio dei dati: {message}"),
        ),
    };
    format!("<p class=\"notice {class}\">{}</p>\n", escape(&text))
}

fn validation_message(reason: &DecideError, require_email: bool) -> String {
    match reason {
        DecideError::MissingName | DecideError::MissingEmail if require_email => {
            "⚠️ Inserisci sia il nome che l'email.".to_string()
        }
        DecideError::MissingName | DecideError::MissingEmail => {
            "⚠️ Inserisci nome e cognome.".to_string()
        }
        DecideError::InvalidShiftReference(_) | DecideError::ShiftUnavailable(_) => {
            "⚠️ Il turno selezionato non è più disponibile, scegline un altro.".to_string()
        }
    }
}

fn date_picker(page: &SignUpPage, out: &mut String) {
    out.push_str("<form method=\"get\" action=\"/\" class=\"date-picker\">\n");
    out.push_str("<label for=\"date\">Data del turno</label>\n<select id=\"date\" name=\"date\">\n");
    for date in &page.dates {
        let text = format_date(*date);
        let selected = if Some(*date) == page.selected_date { " selected" } else { "" };
        let _ = writeln!(out, "<option value=\"{text}\"{selected}>{text}</option>");
    }
    out.push_str("</select>\n<button type=\"submit\">Mostra turni</button>\n</form>\n");
}

fn sign_up_form(page: &SignUpPage, out: &mut String) {
    if page.slots.is_empty() {
        return;
    }
    out.push_str("<h2>Modulo di Iscrizione</h2>\n<form method=\"post\" action=\"/\" class=\"sign-up\">\n");
    let _ = writeln!(
        out,
        "<input type=\"hidden\" name=\"date\" value=\"{}\">",
        escape(&page.form.date)
    );
    let _ = writeln!(
        out,
        "<label for=\"name\">Nome e Cognome</label>\n<input id=\"name\" name=\"name\" type=\"text\" value=\"{}\">",
        escape(&page.form.name)
    );
    let required = if page.require_email { " required" } else { "" };
    let _ = writeln!(
        out,
        "<label for=\"email\">Indirizzo Email</label>\n<input id=\"email\" name=\"email\" type=\"email\" value=\"{}\"{required}>",
        escape(&page.form.email)
    );
    out.push_str("<label for=\"shift\">Seleziona il turno desiderato</label>\n<select id=\"shift\" name=\"shift\">\n");
    for slot in &page.slots {
        let value = slot.shift_reference.to_string();
        let selected = if value == page.form.shift { " selected" } else { "" };
        let _ = writeln!(
            out,
            "<option value=\"{}\"{selected}>{} (posti: {})</option>",
            escape(&value),
            escape(&slot.time_band),
            slot.capacity_remaining
        );
    }
    out.push_str("</select>\n<button type=\"submit\">Conferma Iscrizione</button>\n</form>\n");
}

fn registrations(page: &SignUpPage, out: &mut String) {
    let Some(date) = page.selected_date else {
        return;
    };
    let _ = writeln!(out, "<h2>Iscritti del {}</h2>", format_date(date));
    if page.registrations.is_empty() {
        out.push_str("<p class=\"empty\">Nessuna iscrizione per questa data.</p>\n");
        return;
    }
    for group in &page.registrations {
        let _ = writeln!(out, "<h3>{}</h3>\n<ul>", escape(&group.time_band));
        for registration in &group.volunteers {
            let _ = writeln!(out, "<li>{}</li>", escape(&registration.volunteer_name));
        }
        out.push_str("</ul>\n");
    }
}

pub fn render(page: &SignUpPage) -> String {
    let mut out = String::new();
    let title = escape(&page.title);
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"it\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n</head>\n<body>\n<main>\n<h1>🚑 {title}</h1>\n"
    );
    for notice in &page.notices {
        out.push_str(&notice_html(notice, page.require_email));
    }
    if page.show_form {
        date_picker(page, &mut out);
        sign_up_form(page, &mut out);
        registrations(page, &mut out);
    }
    out.push_str("</main>\n</body>\n</html>\n");
    out
}
