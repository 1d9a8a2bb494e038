//! End-to-end parsing scenarios over the public API.

use entangle::declarations::{Interface, PrimitiveKind, Type};
use entangle::parser::parse;
use entangle::source::Source;
use entangle::token::Position;

fn parse_ok(input: &str) -> Interface {
    let src = Source::from_text(input, "test.etg");

    match parse(&src) {
        Ok(interface) => interface,
        Err(diagnostic) => panic!(
            "unexpected diagnostic parsing `{input}`: {}",
            diagnostic.description()
        ),
    }
}

fn parse_err(input: &str) -> String {
    let src = Source::from_text(input, "test.etg");

    match parse(&src) {
        Ok(_) => panic!("expected a diagnostic parsing `{input}`"),
        Err(diagnostic) => diagnostic.description().to_string(),
    }
}

#[test]
fn minimal_struct_definition() {
    let interface = parse_ok("definition demo\nstruct Hello {}\n");

    assert_eq!(interface.name(), Some("demo"));
    assert_eq!(interface.structs().len(), 1);

    let hello = interface.struct_named("Hello").unwrap();
    assert!(hello.fields().is_empty());
    assert_eq!(hello.parent_name(), None);
    assert!(hello.documentation().is_empty());
}

#[test]
fn enumeration_with_three_values() {
    let interface = parse_ok("definition demo\nenum Color { 1: Red\n 2: Green\n 3: Blue\n }\n");

    let color = interface.enum_named("Color").unwrap();
    assert_eq!(color.values().len(), 3);
    assert_eq!(color.value(1).unwrap().name, "Red");
    assert_eq!(color.value(2).unwrap().name, "Green");
    assert_eq!(color.value(3).unwrap().name, "Blue");
}

#[test]
fn forward_references_are_not_permitted() {
    let input = "definition demo\nexception NotFound\nservice Users {\n GetUser(1: userId uint64) *User\n}\nstruct User { 1: Id uint64 }\n";
    assert_eq!(parse_err(input), "unknown type 'User'");
}

#[test]
fn struct_inheritance_copies_parent_fields() {
    let interface =
        parse_ok("definition demo\nstruct A { 1: X uint32 }\nstruct B : A { 2: Y string }\n");

    let b = interface.struct_named("B").unwrap();
    assert_eq!(b.parent_name(), Some("A"));

    let fields: Vec<(u64, &str, Type)> = b
        .fields()
        .iter()
        .map(|f| (f.index, f.name.as_str(), f.field_type.clone()))
        .collect();
    assert_eq!(
        fields,
        vec![
            (1, "X", Type::primitive(PrimitiveKind::Uint32, false)),
            (2, "Y", Type::primitive(PrimitiveKind::String, false)),
        ]
    );

    // The parent keeps its own field list.
    assert_eq!(interface.struct_named("A").unwrap().fields().len(), 1);
}

#[test]
fn duplicate_field_index_is_diagnosed() {
    assert_eq!(
        parse_err("definition demo\nstruct Foo {\n 1: N uint8\n 1: M bool\n}\n"),
        "field index 1 already in use"
    );
}

#[test]
fn unterminated_literal_is_diagnosed_with_a_span() {
    let src = Source::from_text("definition demo\n\"unterminated", "demo.etg");
    let diagnostic = parse(&src).unwrap_err();

    assert_eq!(diagnostic.description(), "unexpected end of line in literal");

    let frame = diagnostic.frames().last().unwrap();
    assert_eq!(frame.start, Position { line: 2, character: 1 });
    assert_eq!(frame.end, Position { line: 2, character: 13 });

    assert_eq!(
        diagnostic.render(),
        format!(
            "demo.etg:2:1: error: unexpected end of line in literal\n\"unterminated\n^{}\n",
            "~".repeat(12)
        )
    );
}

#[test]
fn declared_names_are_unique_across_kinds() {
    let input = "definition demo\nenum Color {\n 1: Red\n}\nstruct User {\n 1: Hue Color\n}\nexception NotFound\nservice Users {\n Fetch(1: id uint64) *User\n}\n";
    let interface = parse_ok(input);

    let mut names: Vec<&str> = Vec::new();
    names.extend(interface.structs().keys().map(String::as_str));
    names.extend(interface.enums().keys().map(String::as_str));
    names.extend(interface.exceptions().keys().map(String::as_str));
    names.extend(interface.services().keys().map(String::as_str));

    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total);

    for name in names {
        assert!(interface.name_in_use(name));
    }
}

#[test]
fn every_reference_in_a_parsed_interface_resolves() {
    let input = "definition demo\nenum Kind {\n 1: Basic\n}\nstruct Node {\n 1: Kind Kind\n 2: Next *Node\n}\nstruct Tree {\n 1: Root *Tree\n 2: Nodes []Node\n}\nservice Graph {\n Walk(1: start Node) map[int64]*Node\n}\n";
    let interface = parse_ok(input);

    fn assert_resolves(interface: &Interface, declared_type: &Type) {
        match declared_type {
            Type::Primitive { .. } => {}
            Type::Enum { name, .. } => {
                assert!(interface.enum_named(name).is_some(), "unresolved enum {name}")
            }
            Type::Struct { name, .. } => {
                assert!(
                    interface.struct_named(name).is_some(),
                    "unresolved struct {name}"
                )
            }
            Type::List { element, .. } => assert_resolves(interface, element),
            Type::Map { key, value, .. } => {
                assert_resolves(interface, key);
                assert_resolves(interface, value);
            }
        }
    }

    for decl in interface.structs().values() {
        for field in decl.fields() {
            assert_resolves(&interface, &field.field_type);
        }
    }

    for service in interface.services().values() {
        for function in service.functions() {
            for argument in function.arguments() {
                assert_resolves(&interface, &argument.argument_type);
            }
            if let Some(return_type) = function.return_type() {
                assert_resolves(&interface, return_type);
            }
        }
    }
}

#[test]
fn field_and_argument_indices_are_unique_positive_integers() {
    let input = "definition demo\nstruct Wide {\n 3: C bool\n 1: A bool\n 7: B bool\n}\nservice S {\n F(2: b bool, 1: a bool)\n}\n";
    let interface = parse_ok(input);

    let wide = interface.struct_named("Wide").unwrap();
    let mut indices: Vec<u64> = wide.fields().iter().map(|f| f.index).collect();
    assert!(indices.iter().all(|&i| i > 0));
    indices.sort_unstable();
    indices.dedup();
    assert_eq!(indices.len(), wide.fields().len());

    let sorted: Vec<u64> = wide
        .fields_sorted_by_index()
        .iter()
        .map(|f| f.index)
        .collect();
    assert_eq!(sorted, vec![1, 3, 7]);

    let f = interface
        .service_named("S")
        .unwrap()
        .function_named("F")
        .unwrap();
    let argument_indices: Vec<u64> = f
        .arguments_sorted_by_index()
        .iter()
        .map(|a| a.index)
        .collect();
    assert_eq!(argument_indices, vec![1, 2]);
}

#[test]
fn documentation_is_associated_with_declarations() {
    let input = "// The demo schema.\ndefinition demo\n// A color of the\n// rainbow.\n//\n// With a second paragraph.\nenum Color {\n // Warm.\n 1: Red\n}\n";
    let interface = parse_ok(input);

    assert_eq!(interface.documentation(), ["The demo schema."]);

    let color = interface.enum_named("Color").unwrap();
    assert_eq!(
        color.documentation(),
        ["A color of the rainbow.", "With a second paragraph."]
    );
    assert_eq!(color.value(1).unwrap().documentation, ["Warm."]);
}
