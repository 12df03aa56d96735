//! End-to-end recognition tests: whole compilation units in, pass/fail out.

use skald::{parse, SyntaxError};

fn assert_parses(source: &str) {
    if let Err(e) = parse(source) {
        panic!("should parse:\n{source}\nerror: {e}");
    }
}

fn assert_rejects(source: &str) -> skald::ParseError {
    match parse(source) {
        Ok(()) => panic!("should not parse:\n{source}"),
        Err(SyntaxError::Parse(e)) => e,
        Err(other) => panic!("unexpected error kind: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Packages and top level
// ---------------------------------------------------------------------------

#[test]
fn package_then_class() {
    assert_parses("package a.b\nclass C");
}

#[test]
fn empty_input_is_a_valid_unit() {
    assert_parses("");
    assert_parses("\n\n  // only a comment\n");
}

#[test]
fn braced_packagings_nest() {
    assert_parses("package a {\n  package b {\n    class C\n  }\n}");
}

#[test]
fn package_objects() {
    assert_parses("package a.b\npackage object c { val x = 1 }");
}

#[test]
fn flat_package_sequence() {
    assert_parses("package a\npackage b.c\nclass D");
}

#[test]
fn imports() {
    assert_parses("import a.b.C\nclass D");
    assert_parses("import a.b._");
    assert_parses("import a.{B, C}");
    assert_parses("import a.{B => Bee, C => _, _}");
    assert_parses("import a.b, c.d._");
}

#[test]
fn annotations_and_modifiers_on_top_level_defs() {
    assert_parses("@deprecated final class C");
    assert_parses("@SerialVersionUID(1L) sealed abstract class C");
    assert_parses("private[pkg] object O");
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[test]
fn object_with_method() {
    assert_parses("object O { def f(x: Int, y: Int): Int = x + y }");
}

#[test]
fn variant_trait_with_bounded_member() {
    assert_parses("trait T[+A] extends Seq[A] { type B <: A }");
}

#[test]
fn parents_chain_with_self_type() {
    assert_parses("class A extends B with C with D { self: X => }");
}

#[test]
fn case_classes_and_objects() {
    assert_parses("case class Point(x: Int, y: Int)");
    assert_parses("case object Empty");
    assert_parses("case class Wrap[A](value: A) extends AnyVal");
}

#[test]
fn class_with_constructor_plumbing() {
    assert_parses("class C @Inject() private (val x: Int, var y: String = \"d\")");
    assert_parses("class C(implicit ec: Ctx)");
}

#[test]
fn early_definitions() {
    assert_parses("class C extends { val x = 1 } with B");
}

#[test]
fn auxiliary_constructors() {
    assert_parses("class C(x: Int) { def this() = this(0) }");
}

#[test]
fn template_members() {
    assert_parses(
        "class C {\n  val a = 1\n  var b: Int = 2\n  lazy val c = 3\n  def d: Int\n  type T = Int\n  protected def e() = ()\n}",
    );
}

#[test]
fn nested_template_defs() {
    assert_parses("object O { class Inner { object Deeper } }");
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

#[test]
fn paren_for_comprehension() {
    assert_parses("val xs = for (i <- 1 to 10; if i % 2 == 0) yield i * i");
}

#[test]
fn brace_for_comprehension() {
    assert_parses("val xs = for { i <- 1 to 10 ; if i % 2 == 0 } yield i * i");
}

#[test]
fn for_with_value_binding() {
    assert_parses("val r = for (x <- xs; y = x + 1; if y > 0) yield y");
}

#[test]
fn block_with_local_val() {
    assert_parses("class C { def f = { val x = 1 ; x + 1 } }");
}

#[test]
fn control_flow_forms() {
    assert_parses("object O { def f = if (a) b else c }");
    assert_parses("object O { def f = while (x > 0) x -= 1 }");
    assert_parses("object O { def f = do x += 1 while (x < 10) }");
    assert_parses("object O { def f = try g() catch { case e: E => h } finally done() }");
    assert_parses("object O { def f = throw new RuntimeException(\"boom\")\n}");
    assert_parses("object O { def f: Int = return 3 }");
}

#[test]
fn match_expressions() {
    assert_parses(
        "object O { def f(x: Any) = x match {\n  case 1 => \"one\"\n  case s: String => s\n  case Some(v) if v > 0 => v\n  case _ => \"other\"\n} }",
    );
}

#[test]
fn lambdas_and_partial_functions() {
    assert_parses("val f = (x: Int) => x + 1");
    assert_parses("val g = x => x");
    assert_parses("val h = _ => 0");
    assert_parses("val k = xs map { x => val y = x * 2; y }");
    assert_parses("val p: PartialFunction[Int, Int] = { case n if n > 0 => n }");
}

#[test]
fn operator_shapes() {
    assert_parses("val a = x :: y :: Nil");
    assert_parses("val b = -x + ~y * !z");
    assert_parses("val c = xs.foldLeft(0)(_ + _)");
    assert_parses("val d = a max b");
    assert_parses("val e = f(xs: _*)");
    assert_parses("val g = x += 1");
}

#[test]
fn method_calls_and_blocks_as_arguments() {
    assert_parses("val a = xs.map(f).filter(g)");
    assert_parses("val b = xs map { f }");
    assert_parses("val c = obj.method[Int](1, 2)(3)");
    assert_parses("val d = new Builder().add(1).build()");
}

#[test]
fn new_expressions() {
    assert_parses("val a = new C");
    assert_parses("val b = new C(1) with T");
    assert_parses("val c = new { val x = 1 }");
    assert_parses("val d = new C { override def f = 2 }");
}

#[test]
fn assignments() {
    assert_parses("object O { def f() = { x = 1; y.z = 2 } }");
    assert_parses("val a = { b(0) = 9 }");
}

#[test]
fn ascriptions_and_placeholders() {
    assert_parses("val a = (x: Any): @unchecked");
    assert_parses("val f = sum _");
    assert_parses("val g = xs.map(_ + 1)");
}

// ---------------------------------------------------------------------------
// Semicolon inference
// ---------------------------------------------------------------------------

#[test]
fn newline_after_infix_operator_continues_in_parens() {
    assert_parses("val a = (1 +\n 2)");
}

#[test]
fn newline_after_infix_operator_continues_in_braces() {
    assert_parses("object O { def f = { 1 +\n 2 } }");
}

#[test]
fn newline_before_operator_splits_statements_in_braces() {
    assert_parses("object O { def f = { 1\n + 2 } }");
}

#[test]
fn multiline_members_need_no_semicolons() {
    assert_parses("class C {\n  val a = 1\n  val b = 2\n\n  val c = 3\n}");
}

#[test]
fn explicit_semicolons_also_work() {
    assert_parses("class C { val a = 1; val b = 2; }");
}

// ---------------------------------------------------------------------------
// Literals
// ---------------------------------------------------------------------------

#[test]
fn literal_zoo() {
    assert_parses(
        "object O {\n  val a = 42L\n  val b = 0xFF\n  val c = 3.14e-2f\n  val d = 'x'\n  val e = '\\n'\n  val f = \"plain\"\n  val g = s\"interp $x\"\n  val h = \"\"\"raw \" multi\nline\"\"\"\n  val i = 'symbol\n  val j = true\n  val k = null\n}",
    );
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[test]
fn type_zoo() {
    assert_parses(
        "trait T {\n  def a: Map[String, List[Int]]\n  def b: (Int, String) => Unit\n  def c: A with B { def m: Int }\n  def d: x.type\n  def e: A#B\n  def f: List[X] forSome { type X }\n  def g: Int Either String\n  var h: _ <: AnyRef\n}",
    );
    assert_parses("class C[A <: Ord[A], +B, -C, D: Ctx, E <% View]");
    assert_parses("def f[A, B](x: A)(implicit ev: A => B): B");
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn unterminated_template_reports_closing_brace_at_end() {
    let e = assert_rejects("class C {");
    assert_eq!(e.offset, 9);
    assert!(
        e.expected.iter().any(|x| x == "}"),
        "expected set {:?} should contain }}",
        e.expected
    );
}

#[test]
fn missing_binder_reports_id_at_the_equals_sign() {
    let e = assert_rejects("val = 1");
    assert_eq!(e.offset, 4);
    assert!(
        e.expected.iter().any(|x| x == "Id"),
        "expected set {:?} should contain Id",
        e.expected
    );
}

#[test]
fn expected_set_renders_alphabetically() {
    let e = assert_rejects("class C {");
    let mut sorted = e.expected.clone();
    sorted.sort();
    assert_eq!(e.expected, sorted);
    let rendered = e.formatted_expected();
    if e.expected.len() > 1 {
        assert!(rendered.contains(" or "));
    }
}

#[test]
fn failure_reports_line_and_caret() {
    let e = assert_rejects("val = 1");
    assert_eq!(e.line, 1);
    assert_eq!(e.column, 5);
    let block = e.formatted_line();
    let mut lines = block.lines();
    let src = lines.next().unwrap();
    let caret = lines.next().unwrap();
    assert_eq!(src, "val = 1");
    assert_eq!(caret.len(), e.column);
    assert!(caret.ends_with('^'));
}

#[test]
fn failure_trace_names_entered_rules() {
    let e = assert_rejects("val = 1");
    assert!(
        e.trace.iter().any(|r| r == "CompilationUnit"),
        "trace {:?} should contain CompilationUnit",
        e.trace
    );
    assert!(
        e.trace.iter().any(|r| r == "TopStat"),
        "trace {:?} should contain TopStat",
        e.trace
    );
}

#[test]
fn assorted_rejects() {
    assert_rejects("class");
    assert_rejects("object O { def = 1 }");
    assert_rejects("class C { val x = }");
    assert_rejects("trait T { def f(x: ) }");
    assert_rejects("object O { val s = \"open }");
    assert_rejects("import");
}

#[test]
fn leftover_input_is_a_parse_error_not_a_panic() {
    assert_rejects("class C }");
}
