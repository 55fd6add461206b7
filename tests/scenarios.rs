use mdxdoc::model::Parameter;
use mdxdoc::render::params::{classify, ParamLocation};
use mdxdoc::{
    build, format_type, inject, render_site, repair, summarize, Block, Config, Declaration,
    DeclarationRenderer, Kind, Location, ReferenceMap, RenderedDocument, Signature, Type,
};

fn render(decl: &Declaration) -> RenderedDocument {
    let refs = ReferenceMap::new("/");
    let config = Config::default();
    repair(DeclarationRenderer::new(&refs, &config).render(decl))
}

fn class_with_properties(n: usize) -> Declaration {
    (0..n).fold(Declaration::new("Bag", Kind::Class), |class, i| {
        class.with_child(
            Declaration::new(format!("field{}", i), Kind::Property)
                .with_type(Type::intrinsic("string")),
        )
    })
}

#[test]
fn reference_completeness() {
    let root = Declaration::new("root", Kind::Project)
        .with_child(Declaration::new("Foo", Kind::Class))
        .with_child(Declaration::new("Bar", Kind::Interface));
    let refs = build(&root, &Config::default());
    assert_eq!(refs.map.get("Foo"), Some(&Location::new("classes/foo")));
    assert_eq!(refs.map.get("Bar"), Some(&Location::new("interfaces/bar")));
}

#[test]
fn parameter_classification() {
    assert_eq!(classify("userId"), ParamLocation::Path);
    assert_eq!(classify("limit"), ParamLocation::Query);
    assert_eq!(classify("authorization"), ParamLocation::Header);
    assert_eq!(classify("payload"), ParamLocation::Body);
}

#[test]
fn simple_function() {
    let greet = Declaration::new("greet", Kind::Function).with_signature(Signature::new(
        vec![Parameter::new("name", Type::intrinsic("string"))],
        Some(Type::intrinsic("string")),
    ));
    let out = render(&greet).to_markdown();

    let field_start = out.find("<ParamField path=\"name\" type=\"string\" required>\n").unwrap();
    let description = out[field_start..].lines().nth(1).unwrap();
    assert!(description.ends_with('.'), "{description}");
    assert!(!description.ends_with(".."));
    assert!(out.contains("<ResponseField name=\"returns\" type=\"string\">"));
}

#[test]
fn six_properties_use_one_disclosure_group() {
    let out = render(&class_with_properties(6)).to_markdown();
    assert_eq!(out.matches("<AccordionGroup>").count(), 1);
    assert_eq!(out.matches("<Accordion title=").count(), 6);
}

#[test]
fn four_properties_render_flat() {
    let out = render(&class_with_properties(4)).to_markdown();
    assert!(!out.contains("<AccordionGroup>"));
    assert!(!out.contains("<Accordion "));
    assert_eq!(out.matches("<ResponseField name=\"field").count(), 4);
}

#[test]
fn enum_table_placeholders() {
    let member = |name: &str| {
        let mut m = Declaration::new(name, Kind::EnumMember);
        m.default_value = Some(format!("\"{}\"", name));
        m
    };
    let e = Declaration::new("Letter", Kind::Enum)
        .with_child(member("A"))
        .with_child(member("B"));
    let out = render(&e).to_markdown();

    let rows: Vec<&str> = out.lines().filter(|l| l.starts_with("| `")).collect();
    assert_eq!(rows, vec!["| `A` | `\"A\"` | — |", "| `B` | `\"B\"` | — |"]);
}

#[test]
fn overview_truncates_detail() {
    let class = Declaration::new("Engine", Kind::Class);
    let detail = RenderedDocument::parse(
        "---\ntitle: \"Engine\"\n---\n\nRuns the show.\n\n## Startup\n\nstartup internals\n\n## Shutdown\n\nshutdown internals\n\n## Tuning\n\ntuning internals\n",
    );
    let mut refs = ReferenceMap::new("/");
    refs.insert("Engine", Location::new("classes/engine"));

    let out = summarize(&[(&class, &detail)], &refs, &Config::default()).to_markdown();
    assert!(out.contains("### Engine\n\nRuns the show.\n\n[View full documentation](/classes/engine)\n"));
    for hidden in ["Startup", "Shutdown", "Tuning", "internals"] {
        assert!(!out.contains(hidden), "{hidden}");
    }
}

#[test]
fn type_formatting_is_deterministic() {
    let ty = Type::Union {
        members: vec![
            Type::generic("Map", vec![Type::intrinsic("string"), Type::reference("Foo")]),
            Type::Array {
                element: Box::new(Type::Union {
                    members: vec![Type::literal_str("a"), Type::intrinsic("null")],
                }),
            },
        ],
    };
    let mut refs = ReferenceMap::new("/");
    refs.insert("Foo", Location::new("classes/foo"));
    let first = format_type(Some(&ty), Some(&refs));
    assert_eq!(first, format_type(Some(&ty), Some(&refs)));
    assert!(first.contains("[Foo](/classes/foo)"));
}

#[test]
fn no_links_inside_fences() {
    let mut refs = ReferenceMap::new("/");
    refs.insert("Foo", Location::new("classes/foo"));
    let doc = RenderedDocument::parse("Uses `Foo`.\n\n```ts\nconst f: `Foo` = make<Foo>();\n`Foo`\n```\n");
    let out = inject(doc, &refs);

    let fence = out
        .blocks
        .iter()
        .find_map(|b| match b {
            Block::Fence { lines, .. } => Some(lines.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(fence, vec!["const f: `Foo` = make<Foo>();", "`Foo`"]);
    assert_eq!(out.blocks[0], Block::text("Uses [Foo](/classes/foo)."));
}

#[test]
fn repaired_output_is_balanced_and_bounded() {
    let inputs = [
        "<AccordionGroup>\n<Accordion title=\"a\">\n</AccordionGroup>\n</Accordion>\n",
        "</Expandable>\n<Warning>\n###### six\n",
        "<ParamField path=\"x\">\n<Expandable title=\"p\">\n</ParamField>\n</Expandable>\n",
        "```\n<Accordion>\n```\n</CodeGroup>\n\n\n\n\n\ntail\n",
    ];
    for input in inputs {
        let once = repair(RenderedDocument::parse(input));
        assert_eq!(repair(once.clone()), once, "not a fixed point: {input:?}");

        let mut stack: Vec<&str> = Vec::new();
        for block in &once.blocks {
            match block {
                Block::Open(tag) => stack.push(&tag.name),
                Block::Close(name) if name == "CodeGroup" && !stack.contains(&"CodeGroup") => {}
                Block::Close(name) => assert_eq!(stack.pop(), Some(name.as_str()), "{input:?}"),
                Block::Heading { level, .. } => assert!(*level <= 4),
                _ => {}
            }
        }
        assert!(stack.is_empty(), "unclosed in {input:?}");
    }
}

#[test]
fn whole_site_pages_are_stable() {
    let root = Declaration::new("root", Kind::Project)
        .with_child(class_with_properties(7))
        .with_child(
            Declaration::new("make", Kind::Function)
                .with_summary("Build a `Bag`.")
                .with_signature(Signature::new(vec![], Some(Type::reference("Bag")))),
        );
    let site = render_site(&root, &Config::default());
    let refs = build(&root, &Config::default()).map;

    for page in site.pages.iter().chain([&site.overview]) {
        let again = repair(inject(page.document.clone(), &refs));
        assert_eq!(again, page.document, "{}", page.name);
    }
    assert!(site.pages[1]
        .document
        .to_markdown()
        .contains("Build a [Bag](/classes/bag)."));
}
