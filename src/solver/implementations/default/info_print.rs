use super::*;
use crate::algebra::*;
use crate::io::{ConfigurablePrintTarget, PrintTarget};
use crate::solver::core::traits::FieldLayout;
use crate::timers::Timers;
use std::io::Write;
use std::time::Duration;

impl<T> ConfigurablePrintTarget for DefaultInfo<T> {
    fn print_to_stdout(&mut self) {
        self.stream.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.stream.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.stream.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.stream.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.stream.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.stream.get_print_buffer()
    }
}

/// Problem dimensions reported in the configuration printout
pub(crate) struct ProblemSummary<T> {
    pub layout: FieldLayout,
    pub npoints: usize,
    pub length: T,
    pub dim: usize,
    pub nthreads: usize,
}

macro_rules! expformat {
    ($fmt:expr,$val:expr) => {
        if $val.is_finite() {
            _exp_str_reformat(format!($fmt, $val))
        } else {
            format!($fmt, $val)
        }
    };
}

const RULE: &str = "-------------------------------------------------------------";

impl<T> DefaultInfo<T>
where
    T: FloatT,
{
    pub(crate) fn print_banner(&mut self, settings: &DefaultSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }
        let out = &mut self.stream;
        writeln!(out, "{RULE}")?;
        writeln!(
            out,
            "          emme v{}  -  nonlinear eigenvalue search",
            crate::VERSION
        )?;
        writeln!(out, "{RULE}")?;
        Ok(())
    }

    pub(crate) fn print_configuration(
        &mut self,
        settings: &DefaultSettings<T>,
        problem: &ProblemSummary<T>,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        let out = &mut self.stream;

        writeln!(out, "\nproblem:")?;
        writeln!(out, "  fields        = {:?}", problem.layout)?;
        writeln!(out, "  grid points   = {}", problem.npoints)?;
        writeln!(out, "  grid length   = {}", problem.length)?;
        writeln!(out, "  matrix size   = {} x {}", problem.dim, problem.dim)?;

        writeln!(out, "\nsettings:")?;
        write!(
            out,
            "  indicator: {}, precision: {} bit ",
            settings.indicator,
            _get_precision_string::<T>()
        )?;
        print_nthreads(out, problem.nthreads)?;
        writeln!(out)?;
        writeln!(
            out,
            "  max iter = {}, tol = {:.1e}, perturbation = {:.1e}",
            settings.max_iter, settings.tol, settings.initial_perturbation
        )?;
        writeln!(
            out,
            "  eigenvector: {}, nullspace tol = {:.1e}\n",
            _bool_on_off(settings.compute_eigenvector),
            settings.nullspace_tol
        )?;
        Ok(())
    }

    pub(crate) fn print_status_header(
        &mut self,
        settings: &DefaultSettings<T>,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        let out = &mut self.stream;

        write!(out, "iter    ")?;
        write!(out, "re(λ)        ")?;
        write!(out, "im(λ)        ")?;
        write!(out, "|g|       ")?;
        write!(out, "|Δλ|      ")?;
        writeln!(out,)?;
        writeln!(out, "{RULE}")?;
        out.flush()?;
        Ok(())
    }

    pub(crate) fn print_status(&mut self, settings: &DefaultSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        let out = &mut self.stream;

        write!(out, "{:>3}  ", self.iterations)?;
        write!(out, "{}  ", expformat!("{:+8.4e}", self.lambda.re))?;
        write!(out, "{}  ", expformat!("{:+8.4e}", self.lambda.im))?;
        write!(out, "{}  ", expformat!("{:6.2e}", self.indicator.norm()))?;
        if self.iterations > 0 {
            write!(out, "{}  ", expformat!("{:6.2e}", self.d_lambda.norm()))?;
        } else {
            write!(out, " ------   ")?;
        }
        writeln!(out,)?;
        Ok(())
    }

    pub(crate) fn print_footer(
        &mut self,
        settings: &DefaultSettings<T>,
        timers: &Timers,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        let out = &mut self.stream;

        writeln!(out, "{RULE}")?;
        writeln!(out, "Terminated with status = {}", self.status)?;
        writeln!(
            out,
            "eigenvalue = {} {} {}i",
            expformat!("{:+.6e}", self.lambda.re),
            if self.lambda.im < T::zero() { "-" } else { "+" },
            expformat!("{:.6e}", self.lambda.im.abs())
        )?;

        if settings.compute_eigenvector {
            writeln!(out, "null space dimension = {}", self.nullspace_dim)?;
            if self.nullspace_dim == 0 {
                writeln!(
                    out,
                    "warning: no singular value below {:.1e} relative, eigenvector is approximate",
                    settings.nullspace_tol
                )?;
            }
        }

        writeln!(
            out,
            "solve time = {:?}",
            Duration::from_secs_f64(self.solve_time)
        )?;
        timers.print(out)?;
        out.flush()?;
        Ok(())
    }
}

fn _bool_on_off(v: bool) -> &'static str {
    match v {
        true => "on",
        false => "off",
    }
}

fn print_nthreads(out: &mut PrintTarget, nthreads: usize) -> std::io::Result<()> {
    match nthreads {
        0 => Ok(()),
        1 => write!(out, "(1 thread)"),
        _ => write!(out, "({nthreads} threads)"),
    }
}

fn _get_precision_string<T: FloatT>() -> String {
    (::std::mem::size_of::<T>() * 8).to_string()
}

// convert a string in LowerExp display format into one that
// 1) always has a sign after the exponent, and
// 2) has at least two digits in the exponent.

fn _exp_str_reformat(mut thestr: String) -> String {
    let Some(eidx) = thestr.find('e') else {
        return thestr;
    };
    let has_sign = thestr[eidx + 1..].starts_with('-');
    let exp_digits = thestr.len() - eidx - 1 - usize::from(has_sign);

    let chars = match (has_sign, exp_digits < 2) {
        (false, true) => "+0",
        (false, false) => "+",
        (true, true) => "0",
        (true, false) => "",
    };

    let shift = if has_sign { 2 } else { 1 };
    thestr.insert_str(eidx + shift, chars);
    thestr
}

#[test]
fn test_exp_str_reformat() {
    assert_eq!(_exp_str_reformat(format!("{:.2e}", 1.5)), "1.50e+00");
    assert_eq!(_exp_str_reformat(format!("{:.2e}", 0.015)), "1.50e-02");
    assert_eq!(_exp_str_reformat(format!("{:.1e}", 2e120)), "2.0e+120");
    assert_eq!(_exp_str_reformat("inf".to_string()), "inf");
}
