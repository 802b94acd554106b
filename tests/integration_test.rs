//! Integration tests for fortran-linter
//!
//! These tests verify that the components work together correctly

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use fortran_linter::format::F90Indenter;
use fortran_linter::parser::string_literals;
use fortran_linter::rules::{check_line, LineContext};
use fortran_linter::{check_source, Config, LineChecker, RuleCorpus};

fn check(source: &str) -> fortran_linter::CheckReport {
    check_source(source, "test.f90", &Config::default()).unwrap()
}

fn messages(report: &fortran_linter::CheckReport) -> Vec<&str> {
    report
        .diagnostics
        .iter()
        .map(|d| d.message.as_str())
        .collect()
}

const MESSY_MODULE: &str = "\
module m
subroutine s(a,b)
real,intent(in)::a
b=a*2+1 !  double
if(a>0)then
b=-b
elseif(a<0)then
b=(/1/)
else
b=a
end if
end subroutine s
end module m
";

const CLEAN_MODULE: &str = "\
module m
  subroutine s(a, b)
    real, intent(in) :: a
    b = a * 2 + 1 ! double
    if (a > 0) then
      b = -b
    elseif (a < 0) then
      b = [1]
    else
      b = a
    end if
  end subroutine s
end module m
";

#[test]
fn test_messy_module_is_cleaned() {
    let report = check(MESSY_MODULE);
    assert_eq!(report.corrected_text(), CLEAN_MODULE);
    assert!(report.error_count > 0);
    assert!(report.modification_count >= report.error_count);
}

#[test]
fn test_second_pass_is_stable() {
    let first = check(MESSY_MODULE);
    let second = check(&first.corrected_text());
    assert_eq!(second.corrected_text(), first.corrected_text());
    assert_eq!(second.error_count, 0);
    assert_eq!(second.modification_count, 0);
    assert!(!second.has_changes());
}

#[test]
fn test_string_literals_survive_corrections() {
    let source = "\
call foo('a=b,c',x=1)
print *,\"x=1;y\",'it''s'
msg='do i=1,10'!note
";
    let report = check(source);
    assert_eq!(
        report.corrected_text(),
        "call foo('a=b,c', x = 1)\nprint *,\"x=1;y\",'it''s'\nmsg = 'do i=1,10' ! note\n"
    );
    for record in &report.records {
        let before: Vec<&str> = string_literals(&record.original).collect();
        let after: Vec<&str> = string_literals(&record.corrected).collect();
        assert_eq!(before, after, "literals changed in {:?}", record.original);
    }
}

#[test]
fn test_do_loop_spacing() {
    let report = check("do i=1,10\n");
    assert_eq!(report.corrected_text(), "do i = 1, 10\n");
    assert_eq!(report.error_count, 1);
    let diagnostic = &report.diagnostics[0];
    assert_eq!(diagnostic.message, "Missing spaces");
    assert_eq!(diagnostic.line, 1);
    assert_eq!(diagnostic.column, 4);
    assert_eq!(diagnostic.source_line, "do i=1,10");
}

#[test]
fn test_kind_assignment_uses_fallback_group() {
    let report = check("real(kind=8) :: y\n");
    assert_eq!(report.corrected_text(), "real(kind=8) :: y\n");
    assert_eq!(messages(&report), vec![r#"You should use "sp" or "dp" instead"#]);

    let report = check("x=1\n");
    assert_eq!(report.corrected_text(), "x = 1\n");
    assert_eq!(
        messages(&report),
        vec![r#"Missing space after "=""#, r#"Missing space before "=""#]
    );
}

#[test]
fn test_do_block_indentation() {
    let source = "\
do i = 1, n
if (x > 0) then
y = 1 + &
2
end if
end do
z = 0
";
    let expected = "\
do i = 1, n
  if (x > 0) then
    y = 1 + &
      2
  end if
end do
z = 0
";
    let report = check(source);
    assert_eq!(report.corrected_text(), expected);
    assert_eq!(report.error_count, 0);
}

#[test]
fn test_indenter_state_through_file() {
    let mut indenter = F90Indenter::new(2);
    assert_eq!(indenter.indent_line("program main\n"), "program main\n");
    assert_eq!(indenter.scope_depth(), 1);
    assert_eq!(indenter.indent_line("do i = 1, 3\n"), "  do i = 1, 3\n");
    assert_eq!(indenter.scope_depth(), 2);
    assert_eq!(indenter.indent_line("enddo\n"), "  enddo\n");
    assert_eq!(indenter.scope_depth(), 1);
    assert_eq!(indenter.indent_line("end program main\n"), "end program main\n");
    assert_eq!(indenter.scope_depth(), 0);
    assert!(!indenter.state().continuation);
}

#[test]
fn test_end_to_end_diagnostic_order() {
    let source = "\
do i=1,10
x = i! comment
end do
y = 'a string literal that is far too long for the limit'
";
    let config = Config {
        max_line_length: 40,
        ..Default::default()
    };
    let report = check_source(source, "demo.f90", &config).unwrap();
    assert_eq!(
        messages(&report),
        vec![
            "Missing spaces",
            "At least one space before comment",
            "Line length > 40 characters",
        ]
    );
    let lines: Vec<usize> = report.diagnostics.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![1, 2, 4]);
    assert_eq!(
        report.corrected_text(),
        "do i = 1, 10\n  x = i ! comment\nend do\ny = 'a string literal that is far too long for the limit'\n"
    );
}

#[test]
fn test_rendered_diagnostic_format() {
    let report = check("do i=1,10\n");
    assert_eq!(
        report.render_diagnostics(None),
        "test.f90:1:4:\n\n do i=1,10\n     1\nWarning: Missing spaces at (1)."
    );
}

#[test]
fn test_checker_reused_across_files() {
    let checker = LineChecker::new(&Config::default()).unwrap();
    let a = checker.check_source("a.f90", "integer::n\n");
    let b = checker.check_source("b.f90", "integer :: n\n");
    assert_eq!(a.error_count, 2);
    assert_eq!(a.diagnostics[0].filename, "a.f90");
    assert_eq!(b.error_count, 0);
}

#[test]
fn test_check_line_with_default_corpus() {
    let corpus = RuleCorpus::new(&Config::default()).unwrap();
    let ctx = LineContext {
        filename: "x.f90",
        line_number: 3,
        original: "call omp_set_num_threads(4)\n",
    };
    let outcome = check_line(&corpus, &ctx, "call omp_set_num_threads(4)\n");
    assert_eq!(outcome.corrected, "!$ call omp_set_num_threads(4)\n");
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].line, 3);
    assert_eq!(
        outcome.diagnostics[0].message,
        "Should prepend OpenMP calls with !$"
    );
}
