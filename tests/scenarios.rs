use invocat::Interpreter;

#[test]
fn moon_and_sun_reference_is_one_of_the_bound_alternatives() {
    let mut interp = Interpreter::new(Some("scenario-1"));
    let values = interp.eval("x :: moon | sun\n(x) rises.\n").unwrap();
    assert_eq!(values.len(), 1);
    assert!(values[0] == "moon rises." || values[0] == "sun rises.");
}

#[test]
fn table1_color_list_binds_every_line_as_an_alternative() {
    let mut interp = Interpreter::new(Some("scenario-2"));
    let values = interp
        .eval("color\n--------\nmazarine\n    cochineal\n        tartrazine\n\n(color)\n")
        .unwrap();
    assert_eq!(values.len(), 1);
    assert!(["mazarine", "cochineal", "tartrazine"].contains(&values[0].as_str()));
}

#[test]
fn table2_multiline_entry_is_joined_with_a_single_space() {
    let mut interp = Interpreter::new(Some("scenario-3"));
    let values = interp
        .eval(
            "dragon murmurings\n=================\nstill having joy\n-----------------\nthe bloodline\nis not cut off\n-----------------\n\n(dragon murmurings)\n",
        )
        .unwrap();
    assert_eq!(values.len(), 1);
    assert!(
        values[0] == "still having joy" || values[0] == "the bloodline is not cut off",
        "unexpected draw: {:?}",
        values[0]
    );
}

#[test]
fn die_weighted_table_combines_with_a_plain_definition() {
    let mut interp = Interpreter::new(Some("scenario-4"));
    let program = "season :: fall | winter | spring | summer\n\
         d4  memory\n=================\n1  that (season), it disappeared.\n-----------------\n\
         2-4  it is still there.\n-----------------\n\n\
         (memory)\n";
    let values = interp.eval(program).unwrap();
    assert_eq!(values.len(), 1);
    let value = &values[0];
    assert!(
        value.ends_with("it disappeared.") || value == "it is still there.",
        "unexpected memory: {value:?}"
    );
}

#[test]
fn draw_exhausts_a_three_item_list_then_returns_empty_string() {
    let mut interp = Interpreter::new(Some("scenario-5"));
    let mut drawn = Vec::new();
    interp.eval("cards :: ace | king | queen\n").unwrap();
    for _ in 0..4 {
        let values = interp.eval("{cards}\n").unwrap();
        drawn.push(values[0].clone());
    }
    let (first_three, fourth) = drawn.split_at(3);
    let mut sorted = first_three.to_vec();
    sorted.sort();
    assert_eq!(sorted, vec!["ace", "king", "queen"]);
    assert_eq!(fourth[0], "");
}

#[test]
fn evaluating_selection_freezes_a_single_color_for_reuse() {
    let mut interp = Interpreter::new(Some("scenario-6"));
    let values = interp
        .eval(
            "color :: red | blue | green\n\
             certain color <! (color)\n\
             (certain color) and (certain color) match.\n",
        )
        .unwrap();
    assert_eq!(values.len(), 1);
    let chosen = values[0]
        .split(' ')
        .next()
        .expect("at least one word in output");
    assert_eq!(values[0], format!("{chosen} and {chosen} match."));
}
