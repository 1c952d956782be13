//! Zero-failure Weibull success-run bounds.
//!
//! A validation fleet accrues run-hours without failures. The success-run
//! theorem turns that failure-free evidence into a lower confidence bound on
//! reliability at a target life: each unit's hours are first converted into
//! an equivalent number of zero-failure test samples at the target life via
//! the Lipson equality, and the bound follows from the binomial zero-failure
//! relation (equivalently, the chi-squared quantile at two degrees of
//! freedom).

/// Quantile of the chi-squared distribution with two degrees of freedom.
///
/// ```text
/// chi2(p; 2) = -2 * ln(1 - p)
/// ```
///
/// The 2-dof case (the one a zero-failure demonstration test needs) has
/// this exact closed form; no iterative inverse-CDF is required.
///
/// Returns infinity for `p = 1` and 0 for `p = 0`; `p` outside `[0, 1]`
/// yields NaN.
///
/// # Examples
///
/// ```
/// use fleet_reliability::reliability::chi_squared_quantile_2dof;
/// // Textbook value: chi2(0.95; 2) = 5.9915
/// assert!((chi_squared_quantile_2dof(0.95) - 5.991_464_547).abs() < 1e-8);
/// ```
///
/// # Reference
/// Johnson, Kotz & Balakrishnan (1994), *Continuous Univariate
/// Distributions*, Vol. 1, Chapter 18.
pub fn chi_squared_quantile_2dof(p: f64) -> f64 {
    -2.0 * (1.0 - p).ln()
}

/// Lipson equality: converts a test of `n1` samples at `t1` hours each into
/// the equivalent number of samples tested at `t2` hours, under a Weibull
/// life model with shape `beta_shape`.
///
/// ```text
/// n2 = n1 * (t1 / t2)^beta
/// ```
///
/// Longer individual tests are worth more samples at a shorter horizon and
/// vice versa; `beta_shape` governs the exchange rate.
///
/// # Examples
///
/// ```
/// use fleet_reliability::reliability::lipson_equality;
/// // 24 samples at 1000 h are worth 12 samples at 2000 h when beta = 1.
/// assert!((lipson_equality(24.0, 1000.0, 2000.0, 1.0) - 12.0).abs() < 1e-12);
/// ```
///
/// # Reference
/// Lipson & Sheth (1973), *Statistical Design and Analysis of Engineering
/// Experiments*, Sec. 11-6.
pub fn lipson_equality(n1: f64, t1: f64, t2: f64, beta_shape: f64) -> f64 {
    n1 * (t1 / t2).powf(beta_shape)
}

/// Equivalent number of zero-failure samples at `target_life`, accumulated
/// by units that have each run failure-free for `unit_hours[i]` hours.
///
/// ```text
/// n_eq = sum_i (t_i / target_life)^beta
/// ```
///
/// Non-positive per-unit hours contribute nothing (a unit that has not yet
/// started provides no survival evidence).
pub fn lipson_equivalent_units(unit_hours: &[f64], target_life: f64, beta_shape: f64) -> f64 {
    unit_hours
        .iter()
        .filter(|&&t| t > 0.0)
        .map(|&t| lipson_equality(1.0, t, target_life, beta_shape))
        .sum()
}

/// Lower confidence bound on reliability at the target life, given `n_eq`
/// equivalent zero-failure samples (from [`lipson_equivalent_units`]) and a
/// confidence level as a fraction in `(0, 1]`.
///
/// The success-run theorem for zero failures gives
///
/// ```text
/// R = (1 - CL)^(1 / n_eq) = exp(ln(1 - CL) / n_eq)
///   = exp(-chi2(CL; 2) / (2 * n_eq))
/// ```
///
/// Behavior at the boundaries is the mathematically correct limit rather
/// than NaN: `n_eq = 0` (no evidence) yields 0, and `R -> 1` as
/// `n_eq -> inf`. A higher confidence level gives a lower (more
/// conservative) bound.
///
/// # Reference
/// Kececioglu (1993), *Reliability & Life Testing Handbook*, Vol. 1
/// (success-run testing); Abernethy (2006), Ch. 6.
pub fn success_run_reliability(n_eq: f64, confidence: f64) -> f64 {
    if n_eq <= 0.0 {
        return 0.0;
    }
    // ln(1 - CL) is -inf at CL = 1; exp then gives the correct limit 0.
    ((1.0 - confidence).ln() / n_eq).exp()
}
