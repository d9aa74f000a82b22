use barback_catalog::{
    CatalogError, Conversion, ConvertOptions, OZ_TO_ML, RowKind, convert_rows, is_slug_safe,
    read_rows_from_str, validate_catalog,
};

const FLAT_EXPORT: &str = "\
drink,ingredient,amount,glass,garnish,preparation
Oaxaca Old Fashioned,Reposado tequila,1.5,Old Fashioned,Orange twist,Stir over ice.
Oaxaca Old Fashioned,Mezcal,0.5,Old Fashioned,Orange twist,Stir over ice.
Oaxaca Old Fashioned,Agave nectar,1 tsp,Old Fashioned,Orange twist,Stir over ice.
Oaxaca Old Fashioned,Angostura bitters,2 dashes,Old Fashioned,Orange twist,Stir over ice.
Naked and Famous,Mezcal,0.75,Coupe,,Shake and strain.
Naked and Famous,Aperol,0.75,Coupe,,Shake and strain.
Naked and Famous,Yellow Chartreuse,0.75,Coupe,,Shake and strain.
Naked and Famous,Lime juice,0.75,Coupe,,Shake and strain.
";

const SPARSE_EXPORT: &str = "\
Death & Co Specs,,,,
,,,,
Cocktail Name,Ingredient,Measure,Glass,Method
Daiquiri,,,Coupe,Shake hard.
,White rum,2 oz,,
,Lime juice,3/4 oz,,
,Simple syrup,¾ oz,,
,Garnish: lime wheel,,,
,,,,Double strain.
,,,,
Last Word,Gin,3/4,Coupe,Shake.
,Green Chartreuse,3/4,,
";

fn convert(csv: &str) -> Conversion {
    convert_with(csv, &ConvertOptions::default())
}

fn convert_with(csv: &str, options: &ConvertOptions) -> Conversion {
    let rows = read_rows_from_str(csv).unwrap();
    convert_rows(&rows, options).unwrap()
}

#[test]
fn flat_export_groups_rows_by_drink() {
    let conv = convert(FLAT_EXPORT);
    assert_eq!(conv.cocktails.len(), 2);

    let oaxaca = &conv.cocktails[0];
    assert_eq!(oaxaca.id, "deathandco:oaxaca-old-fashioned");
    assert_eq!(oaxaca.name, "Oaxaca Old Fashioned");
    assert_eq!(oaxaca.creator_name.as_deref(), Some("Death & Co"));
    assert_eq!(oaxaca.glass.as_deref(), Some("old fashioned"));
    assert_eq!(oaxaca.garnish.as_deref(), Some("Orange twist"));
    assert_eq!(oaxaca.instructions.as_deref(), Some("Stir over ice."));
    assert!(oaxaca.story.is_none());
    assert!(oaxaca.tags.is_empty());
    assert_eq!(oaxaca.ingredients.len(), 4);

    let famous = &conv.cocktails[1];
    assert_eq!(famous.id, "deathandco:naked-and-famous");
    assert_eq!(famous.glass.as_deref(), Some("coupe"));
    assert!(famous.garnish.is_none());
    assert_eq!(famous.ingredients.len(), 4);
    assert!(!conv.report.has_warnings());
}

#[test]
fn flat_export_converts_ounces() {
    let conv = convert(FLAT_EXPORT);
    let ingredients = &conv.cocktails[0].ingredients;

    assert_eq!(ingredients[0].name, "Reposado tequila");
    assert_eq!(ingredients[0].qty, Some(44.4));
    assert_eq!(ingredients[0].unit.as_deref(), Some("ml"));

    assert_eq!(ingredients[1].qty, Some(14.8));
    assert_eq!(ingredients[1].unit.as_deref(), Some("ml"));

    assert_eq!(ingredients[2].qty, Some(1.0));
    assert_eq!(ingredients[2].unit.as_deref(), Some("tsp"));

    assert_eq!(ingredients[3].qty, Some(2.0));
    assert_eq!(ingredients[3].unit.as_deref(), Some("dash"));

    for ingredient in &conv.cocktails[1].ingredients {
        assert_eq!(ingredient.qty, Some(22.2));
        let exact = 0.75 * OZ_TO_ML;
        assert!((ingredient.qty.unwrap() - exact).abs() <= 0.05);
    }
}

#[test]
fn sparse_export_uses_current_cocktail() {
    let conv = convert(SPARSE_EXPORT);
    assert_eq!(conv.report.header_line, 3);
    assert_eq!(conv.cocktails.len(), 2);

    let daiquiri = &conv.cocktails[0];
    assert_eq!(daiquiri.id, "deathandco:daiquiri");
    assert_eq!(daiquiri.garnish.as_deref(), Some("lime wheel"));
    assert_eq!(
        daiquiri.instructions.as_deref(),
        Some("Shake hard.\n\nDouble strain.")
    );
    let names: Vec<_> = daiquiri.ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["White rum", "Lime juice", "Simple syrup"]);
    assert_eq!(daiquiri.ingredients[0].qty, Some(59.1));
    assert_eq!(daiquiri.ingredients[1].qty, Some(22.2));
    assert_eq!(daiquiri.ingredients[2].qty, Some(22.2));

    let last_word = &conv.cocktails[1];
    assert_eq!(last_word.id, "deathandco:last-word");
    assert_eq!(last_word.ingredients.len(), 2);
    assert_eq!(last_word.ingredients[0].name, "Gin");
    assert_eq!(last_word.ingredients[0].qty, Some(22.2));
}

#[test]
fn sparse_export_row_counts() {
    let conv = convert(SPARSE_EXPORT);
    let report = &conv.report;
    assert_eq!(report.rows_read, 12);
    assert_eq!(report.count(RowKind::Header), 2);
    assert_eq!(report.count(RowKind::Ingredient), 4);
    assert_eq!(report.count(RowKind::Garnish), 1);
    assert_eq!(report.count(RowKind::Note), 1);
    assert_eq!(report.count(RowKind::Blank), 1);
    assert_eq!(report.orphan_rows, 0);
}

#[test]
fn blank_row_closes_cocktail() {
    let csv = "\
drink,ingredient,amount
Daiquiri,Rum,2
,,
,Lime juice,0.75
";
    let conv = convert(csv);
    assert_eq!(conv.cocktails[0].ingredients.len(), 1);
    assert_eq!(conv.report.orphan_rows, 1);
    assert_eq!(conv.report.warnings[0].line, 4);

    let options = ConvertOptions::default().blank_row_ends_cocktail(false);
    let conv = convert_with(csv, &options);
    assert_eq!(conv.cocktails[0].ingredients.len(), 2);
    assert_eq!(conv.report.orphan_rows, 0);
}

#[test]
fn ingredient_before_any_cocktail_is_orphan() {
    let csv = "\
drink,ingredient,amount
,Rum,2
Daiquiri,Rum,2
";
    let conv = convert(csv);
    assert_eq!(conv.report.orphan_rows, 1);
    assert_eq!(conv.cocktails.len(), 1);
    assert_eq!(conv.cocktails[0].ingredients.len(), 1);
}

#[test]
fn split_drink_is_reassembled_in_first_appearance_order() {
    let csv = "\
drink,ingredient,amount
Daiquiri,Rum,2
Gimlet,Gin,2
Daiquiri,Lime juice,0.75
Gimlet,Lime cordial,0.75
daiquiri,Simple syrup,0.75
";
    let conv = convert(csv);
    let ids: Vec<_> = conv.cocktails.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["deathandco:daiquiri", "deathandco:gimlet"]);
    assert_eq!(conv.cocktails[0].name, "Daiquiri");
    assert_eq!(conv.cocktails[0].ingredients.len(), 3);
    assert_eq!(conv.cocktails[1].ingredients.len(), 2);
}

#[test]
fn malformed_amount_becomes_null() {
    let csv = "\
drink,ingredient,amount
Americano,Campari,1
Americano,Soda water,splash
";
    let conv = convert(csv);
    let soda = &conv.cocktails[0].ingredients[1];
    assert_eq!(soda.name, "Soda water");
    assert!(soda.qty.is_none());
    assert!(soda.unit.is_none());
    assert_eq!(conv.report.malformed_amounts, 1);
    assert_eq!(conv.report.warnings.len(), 1);
    assert_eq!(conv.report.warnings[0].line, 3);
}

#[test]
fn zero_amount_is_kept() {
    let csv = "drink,ingredient,amount\nTest,Water,0\n";
    let conv = convert(csv);
    let water = &conv.cocktails[0].ingredients[0];
    assert_eq!(water.qty, Some(0.0));
    assert_eq!(water.unit.as_deref(), Some("ml"));
}

#[test]
fn amount_embedded_in_ingredient_cell() {
    let csv = "\
drink,ingredient
Old Pal,1 oz rye
Old Pal,1 oz Campari
Old Pal,1 oz dry vermouth
Old Pal,Lemon twist
";
    let conv = convert(csv);
    let ingredients = &conv.cocktails[0].ingredients;
    assert_eq!(ingredients[0].name, "rye");
    assert_eq!(ingredients[0].qty, Some(29.6));
    assert_eq!(ingredients[0].unit.as_deref(), Some("ml"));
    assert_eq!(ingredients[3].name, "Lemon twist");
    assert!(ingredients[3].qty.is_none());
}

#[test]
fn unit_column_and_no_ml_option() {
    let csv = "\
drink,ingredient,amount,unit
Manhattan,Rye,2,oz
Manhattan,Sweet vermouth,1,oz
Manhattan,Angostura bitters,2,dashes
";
    let options = ConvertOptions::default().convert_to_ml(false);
    let conv = convert_with(csv, &options);
    let ingredients = &conv.cocktails[0].ingredients;
    assert_eq!(ingredients[0].qty, Some(2.0));
    assert_eq!(ingredients[0].unit.as_deref(), Some("oz"));
    assert_eq!(ingredients[2].unit.as_deref(), Some("dash"));
}

#[test]
fn centiliters_become_milliliters() {
    let csv = "drink,ingredient,amount\nNegroni,Gin,3 cl\n";
    let conv = convert(csv);
    let gin = &conv.cocktails[0].ingredients[0];
    assert_eq!(gin.qty, Some(30.0));
    assert_eq!(gin.unit.as_deref(), Some("ml"));
}

#[test]
fn missing_default_unit_leaves_bare_numbers_empty() {
    let csv = "drink,ingredient,amount\nNegroni,Gin,1\n";
    let options = ConvertOptions::default().default_unit(None);
    let conv = convert_with(csv, &options);
    let gin = &conv.cocktails[0].ingredients[0];
    assert!(gin.qty.is_none());
    assert!(gin.unit.is_none());
    assert_eq!(conv.report.malformed_amounts, 1);
}

#[test]
fn optional_columns_and_defaults() {
    let csv = "\
drink,ingredient,amount,creator,story,tags
Penicillin,Blended Scotch,2,Sam Ross,Created at Milk & Honey.,Sour; Classic
Penicillin,Islay Scotch,0.25,,,classic
";
    let options = ConvertOptions::default()
        .id_prefix("")
        .default_tags(vec!["Modern Classic".to_string()]);
    let conv = convert_with(csv, &options);
    let penicillin = &conv.cocktails[0];
    assert_eq!(penicillin.id, "penicillin");
    assert_eq!(penicillin.creator_name.as_deref(), Some("Sam Ross"));
    assert_eq!(penicillin.story.as_deref(), Some("Created at Milk & Honey."));
    assert_eq!(penicillin.tags, vec!["modern classic", "sour", "classic"]);
}

#[test]
fn creator_defaults_to_none_when_unset() {
    let csv = "drink,ingredient\nGimlet,Gin\n";
    let options = ConvertOptions::default().creator_name(None);
    let conv = convert_with(csv, &options);
    assert!(conv.cocktails[0].creator_name.is_none());
}

#[test]
fn garnish_column_values_are_merged() {
    let csv = "\
drink,ingredient,garnish
Mojito,Rum,Mint sprig
Mojito,Lime juice,mint sprig
Mojito,Soda,Lime wheel
";
    let conv = convert(csv);
    assert_eq!(
        conv.cocktails[0].garnish.as_deref(),
        Some("Mint sprig, Lime wheel")
    );
}

#[test]
fn cocktail_without_ingredients_is_kept_with_warning() {
    let csv = "drink,ingredient,glass\nMystery Drink,,Coupe\n";
    let conv = convert(csv);
    assert_eq!(conv.cocktails.len(), 1);
    assert!(conv.cocktails[0].ingredients.is_empty());
    assert!(conv.report.has_warnings());
}

#[test]
fn unsluggable_name_gets_ordinal_id() {
    let csv = "drink,ingredient\nDaiquiri,Rum\n???,Gin\n???,Lime\n";
    let conv = convert(csv);
    assert_eq!(conv.cocktails[1].id, "deathandco:cocktail-2");
    assert_eq!(conv.cocktails[1].ingredients.len(), 2);
}

#[test]
fn fallback_id_does_not_collide_with_real_slug() {
    let conv = convert("drink,ingredient\n???,Gin\nCocktail 1,Rum\n");
    let ids: Vec<&str> = conv.cocktails.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["deathandco:cocktail-1", "deathandco:cocktail-1-2"]);
    assert!(validate_catalog(&conv.into_catalog("2024-01-01")).is_empty());

    let conv = convert("drink,ingredient\nCocktail 2,Rum\n???,Gin\n???,Lime\n");
    let ids: Vec<&str> = conv.cocktails.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["deathandco:cocktail-2", "deathandco:cocktail-2-2"]);
    assert_eq!(conv.cocktails[1].ingredients.len(), 2);
}

#[test]
fn data_row_with_label_words_is_not_a_repeated_header() {
    let csv = "\
drink,ingredient,tags,story
Daiquiri,Rum,style,notes
,Lime juice,,
";
    let conv = convert(csv);
    assert_eq!(conv.report.count(RowKind::RepeatedHeader), 0);
    assert_eq!(conv.cocktails.len(), 1);
    assert_eq!(conv.cocktails[0].ingredients.len(), 2);
    assert_eq!(conv.cocktails[0].story.as_deref(), Some("notes"));
}

#[test]
fn comments_and_repeated_headers_are_skipped() {
    let csv = "\
drink,ingredient,amount
# page 1
Daiquiri,Rum,2
drink,ingredient,amount
Gimlet,Gin,2
";
    let conv = convert(csv);
    assert_eq!(conv.cocktails.len(), 2);
    assert_eq!(conv.report.count(RowKind::Comment), 1);
    assert_eq!(conv.report.count(RowKind::RepeatedHeader), 1);
    assert!(!conv.report.has_warnings());
}

#[test]
fn missing_header_is_an_error() {
    let rows = read_rows_from_str("Daiquiri,Rum,2\nGimlet,Gin,2\n").unwrap();
    let err = convert_rows(&rows, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, CatalogError::HeaderNotFound(10)));
}

#[test]
fn missing_ingredient_column_is_an_error() {
    let rows = read_rows_from_str("drink,amount,glass\nDaiquiri,2,Coupe\n").unwrap();
    let err = convert_rows(&rows, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, CatalogError::MissingColumn(ref c) if c == "ingredient"));
}

#[test]
fn header_beyond_scan_window_is_not_found() {
    let csv = "title,,\n,,\n,,\ndrink,ingredient,amount\nDaiquiri,Rum,2\n";
    let rows = read_rows_from_str(csv).unwrap();
    let options = ConvertOptions::default().header_scan_rows(2);
    assert!(convert_rows(&rows, &options).is_err());
    let options = ConvertOptions::default().header_scan_rows(4);
    assert!(convert_rows(&rows, &options).is_ok());
}

#[test]
fn output_satisfies_catalog_properties() {
    for csv in [FLAT_EXPORT, SPARSE_EXPORT] {
        let conv = convert(csv);
        for cocktail in &conv.cocktails {
            assert!(is_slug_safe(&cocktail.id), "unsafe id {}", cocktail.id);
            for ingredient in &cocktail.ingredients {
                assert_eq!(ingredient.qty.is_some(), ingredient.unit.is_some());
            }
        }
    }
}

#[test]
fn conversion_is_deterministic() {
    for csv in [FLAT_EXPORT, SPARSE_EXPORT] {
        let first = serde_json::to_string(&convert(csv).cocktails).unwrap();
        let second = serde_json::to_string(&convert(csv).cocktails).unwrap();
        assert_eq!(first, second);
    }
}
