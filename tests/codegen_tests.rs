// Emitted-C shape tests, one group per statement form

use tinybc::compile;

#[test]
fn test_if_block_shape() {
    let source = "LET x = 1\nIF x >= 1 THEN\nPRINT \"big\"\nENDIF\n";
    let output = compile(source).expect("Compilation failed");

    assert!(output.contains("if(x>=1){"));
    assert!(output.contains("printf(\"big\\n\");"));
    // block closes before the fixed program footer
    let close = output.find("}\nreturn 0;").expect("missing block close");
    let open = output.find("if(").unwrap();
    assert!(open < close);
}

#[test]
fn test_while_block_shape() {
    let source = "LET i = 3\nWHILE i != 0 REPEAT\nLET i = i - 1\nENDWHILE\n";
    let output = compile(source).expect("Compilation failed");

    assert!(output.contains("while(i!=0){"));
    assert!(output.contains("i = i-1;"));
}

#[test]
fn test_nested_blocks() {
    let source = r#"
        LET i = 0
        WHILE i < 3 REPEAT
            IF i == 1 THEN
                PRINT "middle"
            ENDIF
            LET i = i + 1
        ENDWHILE
    "#;
    let output = compile(source).expect("Compilation failed");

    assert!(output.contains("while(i<3){"));
    assert!(output.contains("if(i==1){"));
    assert_eq!(output.matches('{').count(), 3); // main, while, if
    assert_eq!(output.matches('}').count(), 3);
}

#[test]
fn test_unary_sign_passthrough() {
    let source = "LET x = 5\nLET y = -x\nLET z = +2 - -3\n";
    let output = compile(source).expect("Compilation failed");

    assert!(output.contains("y = -x;"));
    assert!(output.contains("z = +2--3;"));
}

#[test]
fn test_division_and_decimals() {
    let source = "LET half = 1 / 2.0\nPRINT half\n";
    let output = compile(source).expect("Compilation failed");

    assert!(output.contains("half = 1/2.0;"));
    assert!(output.contains("printf(\"%.2f\\n\", (float)(half));"));
}

#[test]
fn test_label_and_goto_pair() {
    let source = "LABEL top\nGOTO top\n";
    let output = compile(source).expect("Compilation failed");

    assert!(output.contains("top:\n"));
    assert!(output.contains("goto top;\n"));
}

#[test]
fn test_input_reads_into_declared_float() {
    let source = "INPUT age\nPRINT age\n";
    let output = compile(source).expect("Compilation failed");

    assert!(output.contains("float age;"));
    assert!(output.contains("if(0 == scanf(\"%f\", &age)) {"));
    assert!(output.contains("age = 0;"));
    assert!(output.contains("scanf(\"%*s\");"));
}

#[test]
fn test_blank_lines_and_comments_ignored() {
    let source = "\n\n# leading comment\n\nPRINT \"ok\"\n\n# trailing comment\n";
    let output = compile(source).expect("Compilation failed");

    assert!(output.contains("printf(\"ok\\n\");"));
}

#[test]
fn test_chained_comparison() {
    // the grammar allows operator chains; they pass through token by token
    let source = "LET a = 1\nLET b = 2\nIF a < b == 1 THEN\nPRINT a\nENDIF\n";
    let output = compile(source).expect("Compilation failed");

    assert!(output.contains("if(a<b==1){"));
}
