use indoc::indoc;

use super::build::{name, range, string};
use super::{
    AlternativeAst, AlternativeTransformationAst, ElementAst, ElementBody, GrammarAst, Identifier,
    ListItemAst, NewAst,
    Operator, PriorityKind, ProductionAst, ProductionKind, ProductionTransformationAst,
    ReferenceAst, TransformationElementAst, TreeAlternativeAst, TreeElementAst,
    TreeProductionAst, Unit,
};

#[test]
fn minimal_grammar() {
    let json = indoc! {r#"
        {
          "lexer": { "tokens": ["num"] },
          "parser": {
            "productions": [
              { "name": "exp", "alternatives": [{ "elements": [{ "normal": { "name": "num" } }] }] }
            ]
          }
        }
    "#};

    let ast = GrammarAst::from_json(json).unwrap();

    assert_eq!(
        ast,
        GrammarAst::new().token("num").production(
            ProductionAst::new("exp")
                .alternative(AlternativeAst::new([ElementAst::normal(name("num"))]))
        )
    );
    assert!(ast.tree.is_none());
}

#[test]
fn spanned_identifiers() {
    let json = indoc! {r#"
        {
          "parser": {
            "roots": [{ "text": "exp", "span": [7, 4] }],
            "productions": [
              {
                "name": { "text": "exp", "span": [4, 7] },
                "alternatives": [
                  {
                    "name": { "text": "num", "span": [11, 14] },
                    "elements": [{ "normal": { "name": "num" }, "span": [16, 19] }],
                    "span": [10, 19]
                  }
                ]
              }
            ]
          }
        }
    "#};

    let ast = GrammarAst::from_json(json).unwrap();

    assert_eq!(ast.parser.roots, [Identifier::new("exp", range(4, 7))]);
    let production = &ast.parser.productions[0];
    assert_eq!(production.name.span, range(4, 7));
    let alternative = &production.alternatives[0];
    assert_eq!(alternative.span, range(10, 19));
    assert_eq!(alternative.name.as_ref().map(|n| n.span), Some(range(11, 14)));
    assert_eq!(alternative.elements[0].span, range(16, 19));
    let ElementBody::Normal { unit, .. } = &alternative.elements[0].body else {
        panic!("expected a normal element");
    };
    assert_eq!(unit.identifier().map(|i| i.span), Some(range(16, 19)));
}

#[test]
fn units_operators_and_priorities() {
    let json = indoc! {r#"
        {
          "lexer": {
            "tokens": ["num", "comma"],
            "selectors": [{ "name": "kw", "selections": ["if_kw"] }]
          },
          "parser": {
            "productions": [
              {
                "name": "exp",
                "alternatives": [
                  { "name": "add", "elements": [{ "normal": { "name": "exp" } }, { "normal": { "string": "+" } }, { "normal": { "name": "exp" } }] },
                  { "name": "list", "elements": [{ "separated": [{ "name": "num" }, { "name": "comma" }], "op": "*" }] },
                  { "name": "many", "elements": [{ "normal": { "name": "num" }, "op": { "between": [1, 3] } }] },
                  { "name": "edge", "elements": [{ "normal": "start" }, { "normal": "end" }] }
                ],
                "priorities": [{ "kind": "left", "alternatives": ["add"] }]
              },
              {
                "name": "tail",
                "kind": "dangling",
                "alternatives": [{ "elements": [{ "dangling": { "name": "exp" } }] }]
              }
            ]
          }
        }
    "#};

    let ast = GrammarAst::from_json(json).unwrap();

    let expected = GrammarAst::new()
        .tokens(["num", "comma"])
        .lexer_selector("kw", &["if_kw"])
        .production(
            ProductionAst::new("exp")
                .alternative(
                    AlternativeAst::new([
                        ElementAst::normal(name("exp")),
                        ElementAst::normal(string("+")),
                        ElementAst::normal(name("exp")),
                    ])
                    .named("add"),
                )
                .alternative(
                    AlternativeAst::new([ElementAst::separated(name("num"), name("comma"))
                        .op(Operator::ZeroOrMore)])
                    .named("list"),
                )
                .alternative(
                    AlternativeAst::new([
                        ElementAst::normal(name("num")).op(Operator::Between(1, 3))
                    ])
                    .named("many"),
                )
                .alternative(
                    AlternativeAst::new([
                        ElementAst::normal(Unit::Start(Default::default())),
                        ElementAst::normal(Unit::End(Default::default())),
                    ])
                    .named("edge"),
                )
                .priority(PriorityKind::Left, &["add"]),
        )
        .production(
            ProductionAst::new("tail")
                .kind(ProductionKind::Dangling)
                .alternative(AlternativeAst::new([ElementAst::dangling(name("exp"))])),
        );
    assert_eq!(ast, expected);
}

#[test]
fn tree_and_transformations() {
    let json = indoc! {r#"
        {
          "tree": {
            "productions": [
              { "name": "exp", "alternatives": [{ "name": "add", "elements": [{ "name": "l", "normal": { "name": "exp" } }, { "normal": { "name": "exp" }, "op": "?" }] }] }
            ]
          },
          "transformation": {
            "productions": [{ "production": "args", "elements": [{ "name": "ids", "normal": { "name": "id" }, "op": "+" }] }],
            "alternatives": [
              {
                "production": "exp",
                "alternative": "add",
                "elements": [
                  { "new": { "production": "exp", "alternative": "add", "params": [{ "ref": "l" }, "null"] } },
                  { "list": [{ "expand": { "element": "args", "part": "ids" } }, { "expand_left": "xs" }, { "ref": "r" }] }
                ]
              }
            ]
          }
        }
    "#};

    let ast = GrammarAst::from_json(json).unwrap();

    let expected = GrammarAst::new()
        .tree_production(
            TreeProductionAst::new("exp").alternative(
                TreeAlternativeAst::new([
                    TreeElementAst::normal(name("exp")).named("l"),
                    TreeElementAst::normal(name("exp")).op(Operator::ZeroOrOne),
                ])
                .named("add"),
            ),
        )
        .production_transformation(ProductionTransformationAst::new(
            "args",
            [TreeElementAst::normal(name("id")).op(Operator::OneOrMore).named("ids")],
        ))
        .alternative_transformation(AlternativeTransformationAst::new(
            "exp",
            Some("add"),
            [
                NewAst::new(
                    "exp",
                    Some("add"),
                    [ReferenceAst::natural("l").into(), TransformationElementAst::null()],
                )
                .into(),
                TransformationElementAst::list([
                    ListItemAst::expand(ReferenceAst::transformed("args", "ids")),
                    ListItemAst::expand_left(ReferenceAst::natural("xs")),
                    ListItemAst::Reference(ReferenceAst::natural("r")),
                ]),
            ],
        ));
    assert_eq!(ast, expected);
}

#[test]
fn empty_tree_section() {
    let ast = GrammarAst::from_json(r#"{ "tree": {} }"#).unwrap();

    assert_eq!(ast, GrammarAst::new().empty_tree());
}

#[test]
fn missing_field() {
    let json = r#"{ "parser": { "productions": [{ "alternatives": [] }] } }"#;

    let error = GrammarAst::from_json(json).unwrap_err();

    assert!(
        error
            .to_string()
            .starts_with("invalid grammar AST: missing field `name`"),
        "{error}"
    );
}

#[test]
fn unknown_unit() {
    let json = indoc! {r#"
        { "parser": { "productions": [{ "name": "p", "alternatives": [{ "elements": [{ "normal": { "regex": "a+" } }] }] }] } }
    "#};

    assert!(GrammarAst::from_json(json).is_err());
}
