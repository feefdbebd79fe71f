//! Core units, constants, and ISA atmosphere primitives for the descent planner workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Standard gravity (m/s²).
    pub const G0: f64 = 9.80665;
    /// Specific gas constant of dry air (J/(kg·K)).
    pub const R_AIR: f64 = 287.05287;
    /// Adiabatic index of air.
    pub const KAPPA: f64 = 1.4;
    /// ISA sea-level temperature (K).
    pub const T0_K: f64 = 288.15;
    /// ISA sea-level pressure (Pa).
    pub const P0_PA: f64 = 101_325.0;
    /// ISA sea-level density (kg/m³).
    pub const RHO0_KG_M3: f64 = 1.225;
    /// ISA sea-level speed of sound (m/s).
    pub const A0_M_S: f64 = 340.294;
    /// Troposphere temperature gradient (K/m).
    pub const LAPSE_RATE_K_M: f64 = -0.0065;
    /// Geopotential altitude of the tropopause (m).
    pub const TROPOPAUSE_M: f64 = 11_000.0;
    /// ISA temperature at the tropopause (K).
    pub const TROPOPAUSE_T_K: f64 = 216.65;
    /// Feet per minute in one metre per second.
    pub const FT_MIN_PER_M_S: f64 = 196.85;
    /// Feet per nautical mile.
    pub const FT_PER_NM: f64 = 6_076.12;
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
}

/// Basic unit conversion helpers.
pub mod units {
    const KT_TO_M_S: f64 = 0.514444;
    const FT_TO_M: f64 = 0.3048;

    /// Convert knots to metres per second.
    #[inline]
    pub fn kt_to_ms(v: f64) -> f64 {
        v * KT_TO_M_S
    }

    /// Convert metres per second to knots.
    #[inline]
    pub fn ms_to_kt(v: f64) -> f64 {
        v / KT_TO_M_S
    }

    /// Convert feet to metres.
    #[inline]
    pub fn ft_to_m(v: f64) -> f64 {
        v * FT_TO_M
    }

    /// Convert metres to feet.
    #[inline]
    pub fn m_to_ft(v: f64) -> f64 {
        v / FT_TO_M
    }

    /// Convert a flight level (hundreds of feet) to feet.
    #[inline]
    pub fn fl_to_ft(flight_level: i32) -> f64 {
        f64::from(flight_level) * 100.0
    }

    /// Convert an altitude in feet to the flight level it falls on (truncating).
    #[inline]
    pub fn ft_to_fl(altitude_ft: f64) -> i32 {
        (altitude_ft / 100.0) as i32
    }
}

/// Decimal rounding used for every published quantity.
pub mod rounding {
    /// Round half away from zero to `decimals` places.
    #[inline]
    pub fn round_to(value: f64, decimals: i32) -> f64 {
        let scale = 10f64.powi(decimals);
        (value * scale).round() / scale
    }
}

/// International Standard Atmosphere with a constant temperature deviation.
pub mod atmosphere {
    use super::constants::{
        A0_M_S, G0, KAPPA, LAPSE_RATE_K_M, P0_PA, R_AIR, RHO0_KG_M3, T0_K, TROPOPAUSE_M,
        TROPOPAUSE_T_K,
    };

    /// Ratios of temperature, pressure and density to their ISA sea-level values.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct AtmosphereState {
        pub theta: f64,
        pub delta: f64,
        pub sigma: f64,
    }

    impl AtmosphereState {
        pub fn temperature_k(&self) -> f64 {
            self.theta * T0_K
        }

        pub fn pressure_pa(&self) -> f64 {
            self.delta * P0_PA
        }

        pub fn density_kg_m3(&self) -> f64 {
            self.sigma * RHO0_KG_M3
        }

        /// Local speed of sound (m/s).
        pub fn speed_of_sound(&self) -> f64 {
            (KAPPA * R_AIR * self.temperature_k()).sqrt()
        }
    }

    fn pressure_exponent() -> f64 {
        -G0 / (LAPSE_RATE_K_M * R_AIR)
    }

    fn tropopause_delta() -> f64 {
        (TROPOPAUSE_T_K / T0_K).powf(pressure_exponent())
    }

    /// Evaluate the atmosphere at a geopotential altitude with temperature deviation `delta_temp_k`.
    ///
    /// The deviation shifts temperature only; pressure follows the standard pressure altitude.
    pub fn isa(altitude_m: f64, delta_temp_k: f64) -> AtmosphereState {
        let (temperature, delta) = if altitude_m <= TROPOPAUSE_M {
            let isa_temperature = T0_K + LAPSE_RATE_K_M * altitude_m;
            (
                isa_temperature + delta_temp_k,
                (isa_temperature / T0_K).powf(pressure_exponent()),
            )
        } else {
            let decay = (-G0 / (R_AIR * TROPOPAUSE_T_K) * (altitude_m - TROPOPAUSE_M)).exp();
            (TROPOPAUSE_T_K + delta_temp_k, tropopause_delta() * decay)
        };
        let theta = temperature / T0_K;
        AtmosphereState {
            theta,
            delta,
            sigma: delta / theta,
        }
    }

    /// Convert Mach number to true airspeed (m/s).
    pub fn mach_to_tas(mach: f64, state: &AtmosphereState) -> f64 {
        mach * state.speed_of_sound()
    }

    /// Convert true airspeed (m/s) to Mach number.
    pub fn tas_to_mach(tas_m_s: f64, state: &AtmosphereState) -> f64 {
        tas_m_s / state.speed_of_sound()
    }

    /// Convert calibrated airspeed (m/s) to true airspeed (m/s) using compressible flow.
    pub fn cas_to_tas(cas_m_s: f64, state: &AtmosphereState) -> f64 {
        let mu = (KAPPA - 1.0) / KAPPA;
        let p = state.pressure_pa();
        let rho = state.density_kg_m3();
        let impact = (1.0 + mu / 2.0 * RHO0_KG_M3 / P0_PA * cas_m_s * cas_m_s).powf(1.0 / mu) - 1.0;
        let inner = (1.0 + P0_PA / p * impact).powf(mu) - 1.0;
        (2.0 / mu * p / rho * inner).sqrt()
    }

    /// Convert true airspeed (m/s) to calibrated airspeed (m/s).
    pub fn tas_to_cas(tas_m_s: f64, state: &AtmosphereState) -> f64 {
        let mu = (KAPPA - 1.0) / KAPPA;
        let p = state.pressure_pa();
        let rho = state.density_kg_m3();
        let impact = (1.0 + mu / 2.0 * rho / p * tas_m_s * tas_m_s).powf(1.0 / mu) - 1.0;
        let inner = (1.0 + p / P0_PA * impact).powf(mu) - 1.0;
        (2.0 / mu * P0_PA / RHO0_KG_M3 * inner).sqrt()
    }

    /// Convert Mach number to calibrated airspeed (m/s).
    pub fn mach_to_cas(mach: f64, state: &AtmosphereState) -> f64 {
        tas_to_cas(mach_to_tas(mach, state), state)
    }

    /// Geopotential altitude (m) at which `cas_m_s` and `mach` describe the same true airspeed.
    ///
    /// Independent of the temperature deviation since it depends on pressure only.
    pub fn crossover_altitude(cas_m_s: f64, mach: f64) -> f64 {
        let cas_ratio = cas_m_s / A0_M_S;
        let numerator = (1.0 + 0.2 * cas_ratio * cas_ratio).powf(3.5) - 1.0;
        let denominator = (1.0 + 0.2 * mach * mach).powf(3.5) - 1.0;
        let delta_trans = numerator / denominator;
        let theta_trans = delta_trans.powf(1.0 / pressure_exponent());
        let altitude = T0_K / LAPSE_RATE_K_M * (theta_trans - 1.0);
        if altitude <= TROPOPAUSE_M {
            altitude
        } else {
            TROPOPAUSE_M - R_AIR * TROPOPAUSE_T_K / G0 * (delta_trans / tropopause_delta()).ln()
        }
    }
}
