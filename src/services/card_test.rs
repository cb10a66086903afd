use super::*;

// =============================================================================
// format_card_number
// =============================================================================

#[test]
fn groups_full_card_number() {
    assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
}

#[test]
fn regroups_already_spaced_input() {
    assert_eq!(format_card_number("4111 1111 1111 1111"), "4111 1111 1111 1111");
    assert_eq!(format_card_number("41 111 1111"), "4111 1111");
}

#[test]
fn drops_non_digits_and_keeps_order() {
    assert_eq!(format_card_number("12-34ab56"), "1234 56");
    assert_eq!(format_card_number("\t9\n8 7x6"), "9876");
}

#[test]
fn keeps_partial_final_group() {
    assert_eq!(format_card_number("1234567"), "1234 567");
    assert_eq!(format_card_number("1234"), "1234");
}

#[test]
fn truncates_to_sixteen_digits() {
    assert_eq!(format_card_number("12345678901234567890"), "1234 5678 9012 3456");
}

#[test]
fn fewer_than_four_digits_returns_input_unchanged() {
    assert_eq!(format_card_number(""), "");
    assert_eq!(format_card_number("123"), "123");
    assert_eq!(format_card_number("1a2b3c"), "1a2b3c");
    assert_eq!(format_card_number("  abc "), "  abc ");
}

#[test]
fn non_ascii_digits_are_not_counted() {
    assert_eq!(format_card_number("١٢٣٤"), "١٢٣٤");
}

#[test]
fn output_chunks_are_four_digits_except_last() {
    for len in 4..=16 {
        let raw: String = (0..len).map(|i| char::from(b'0' + (i % 10) as u8)).collect();
        let formatted = format_card_number(&raw);
        let groups: Vec<&str> = formatted.split(' ').collect();
        let (last, rest) = groups.split_last().unwrap();
        assert!(rest.iter().all(|g| g.len() == 4), "len {len}: {formatted}");
        assert!((1..=4).contains(&last.len()), "len {len}: {formatted}");
        assert_eq!(formatted.replace(' ', ""), raw);
    }
}

// =============================================================================
// format_expiry
// =============================================================================

#[test]
fn expiry_appends_slash_after_month() {
    assert_eq!(format_expiry("1", "12"), "12/");
}

#[test]
fn expiry_does_not_reappend_when_deleting_slash() {
    assert_eq!(format_expiry("12/", "12"), "12");
}

#[test]
fn expiry_leaves_other_lengths_alone() {
    assert_eq!(format_expiry("", "1"), "1");
    assert_eq!(format_expiry("12/", "12/2"), "12/2");
    assert_eq!(format_expiry("12/2", "12/25"), "12/25");
}

#[test]
fn expiry_with_slash_already_present_is_unchanged() {
    assert_eq!(format_expiry("", "1/"), "1/");
}

#[test]
fn expiry_is_limited_to_five_chars() {
    assert_eq!(format_expiry("12/25", "12/256"), "12/25");
}

// =============================================================================
// sanitize_cvv
// =============================================================================

#[test]
fn cvv_keeps_digits_only() {
    assert_eq!(sanitize_cvv("1a2"), "12");
    assert_eq!(sanitize_cvv("abc"), "");
}

#[test]
fn cvv_is_limited_to_three_digits() {
    assert_eq!(sanitize_cvv("12345"), "123");
}

// =============================================================================
// CardInputState
// =============================================================================

#[test]
fn default_display_shows_placeholders() {
    let display = CardInputState::default().display();
    assert_eq!(display.card_number, CARD_NUMBER_PLACEHOLDER);
    assert_eq!(display.card_holder, CARD_NAME_PLACEHOLDER);
    assert_eq!(display.expiry, EXPIRY_PLACEHOLDER);
    assert_eq!(display.cvv, "");
}

#[test]
fn apply_runs_field_transforms() {
    let mut state = CardInputState::default();
    state.apply(CardUpdate {
        card_number: Some("4111111111111111".into()),
        card_name: Some("Jane Doe".into()),
        expiry_date: Some("09".into()),
        cvv: Some("7x89".into()),
    });
    assert_eq!(state.card_number, "4111 1111 1111 1111");
    assert_eq!(state.card_name, "Jane Doe");
    assert_eq!(state.expiry_date, "09/");
    assert_eq!(state.cvv, "789");

    let display = state.display();
    assert_eq!(display.card_number, "4111 1111 1111 1111");
    assert_eq!(display.card_holder, "Jane Doe");
    assert_eq!(display.cvv, "•••");
}

#[test]
fn apply_keeps_absent_fields() {
    let mut state = CardInputState::default();
    state.apply(CardUpdate { card_name: Some("A".into()), ..CardUpdate::default() });
    state.apply(CardUpdate { cvv: Some("1".into()), ..CardUpdate::default() });
    assert_eq!(state.card_name, "A");
    assert_eq!(state.cvv, "1");
}

#[test]
fn apply_uses_previous_expiry_for_backspace() {
    let mut state = CardInputState::default();
    state.apply(CardUpdate { expiry_date: Some("12".into()), ..CardUpdate::default() });
    assert_eq!(state.expiry_date, "12/");
    state.apply(CardUpdate { expiry_date: Some("12".into()), ..CardUpdate::default() });
    assert_eq!(state.expiry_date, "12");
}

#[test]
fn apply_limits_raw_card_input_length() {
    let mut state = CardInputState::default();
    state.apply(CardUpdate { card_number: Some("1111 2222 3333 4444 5555".into()), ..CardUpdate::default() });
    assert_eq!(state.card_number, "1111 2222 3333 4444");
}
