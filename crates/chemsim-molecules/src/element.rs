//! Periodic table data and element lookup.

/// A chemical element. Masses are in daltons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub atomic_number: u8,
    pub symbol: &'static str,
    /// Standard atomic weight (natural isotope mix).
    pub atomic_weight: f64,
    /// Mass of the most abundant isotope.
    pub monoisotopic_mass: f64,
    /// Bond radius (angstroms) of the Labute surface model.
    pub bond_radius: f64,
}

/// Index 0 is the `*` dummy atom, then H through Og.
static ELEMENTS: [Element; 119] = [
    Element { atomic_number: 0, symbol: "*", atomic_weight: 0.0, monoisotopic_mass: 0.0, bond_radius: 0.0 },
    Element { atomic_number: 1, symbol: "H", atomic_weight: 1.008, monoisotopic_mass: 1.0078250319, bond_radius: 0.33 },
    Element { atomic_number: 2, symbol: "He", atomic_weight: 4.003, monoisotopic_mass: 4.0026032, bond_radius: 0.7 },
    Element { atomic_number: 3, symbol: "Li", atomic_weight: 6.941, monoisotopic_mass: 7.016004, bond_radius: 1.23 },
    Element { atomic_number: 4, symbol: "Be", atomic_weight: 9.012, monoisotopic_mass: 9.0121821, bond_radius: 0.9 },
    Element { atomic_number: 5, symbol: "B", atomic_weight: 10.81, monoisotopic_mass: 11.0093055, bond_radius: 0.82 },
    Element { atomic_number: 6, symbol: "C", atomic_weight: 12.011, monoisotopic_mass: 12.0, bond_radius: 0.77 },
    Element { atomic_number: 7, symbol: "N", atomic_weight: 14.007, monoisotopic_mass: 14.0030740052, bond_radius: 0.7 },
    Element { atomic_number: 8, symbol: "O", atomic_weight: 15.999, monoisotopic_mass: 15.9949146221, bond_radius: 0.66 },
    Element { atomic_number: 9, symbol: "F", atomic_weight: 18.998, monoisotopic_mass: 18.9984032, bond_radius: 0.611 },
    Element { atomic_number: 10, symbol: "Ne", atomic_weight: 20.18, monoisotopic_mass: 19.9924401759, bond_radius: 0.7 },
    Element { atomic_number: 11, symbol: "Na", atomic_weight: 22.99, monoisotopic_mass: 22.98976966, bond_radius: 1.54 },
    Element { atomic_number: 12, symbol: "Mg", atomic_weight: 24.305, monoisotopic_mass: 23.98504187, bond_radius: 1.36 },
    Element { atomic_number: 13, symbol: "Al", atomic_weight: 26.982, monoisotopic_mass: 26.98153841, bond_radius: 1.18 },
    Element { atomic_number: 14, symbol: "Si", atomic_weight: 28.086, monoisotopic_mass: 27.97692649, bond_radius: 0.937 },
    Element { atomic_number: 15, symbol: "P", atomic_weight: 30.974, monoisotopic_mass: 30.97376151, bond_radius: 0.89 },
    Element { atomic_number: 16, symbol: "S", atomic_weight: 32.06, monoisotopic_mass: 31.97207069, bond_radius: 1.04 },
    Element { atomic_number: 17, symbol: "Cl", atomic_weight: 35.45, monoisotopic_mass: 34.96885271, bond_radius: 0.997 },
    Element { atomic_number: 18, symbol: "Ar", atomic_weight: 39.948, monoisotopic_mass: 39.962383124, bond_radius: 1.74 },
    Element { atomic_number: 19, symbol: "K", atomic_weight: 39.098, monoisotopic_mass: 38.9637069, bond_radius: 2.03 },
    Element { atomic_number: 20, symbol: "Ca", atomic_weight: 40.078, monoisotopic_mass: 39.9625912, bond_radius: 1.74 },
    Element { atomic_number: 21, symbol: "Sc", atomic_weight: 44.956, monoisotopic_mass: 44.9559102, bond_radius: 1.44 },
    Element { atomic_number: 22, symbol: "Ti", atomic_weight: 47.867, monoisotopic_mass: 47.9479471, bond_radius: 1.32 },
    Element { atomic_number: 23, symbol: "V", atomic_weight: 50.942, monoisotopic_mass: 50.9439635, bond_radius: 1.22 },
    Element { atomic_number: 24, symbol: "Cr", atomic_weight: 51.996, monoisotopic_mass: 51.9405119, bond_radius: 1.18 },
    Element { atomic_number: 25, symbol: "Mn", atomic_weight: 54.938, monoisotopic_mass: 54.9380496, bond_radius: 1.17 },
    Element { atomic_number: 26, symbol: "Fe", atomic_weight: 55.845, monoisotopic_mass: 55.9349421, bond_radius: 1.17 },
    Element { atomic_number: 27, symbol: "Co", atomic_weight: 58.933, monoisotopic_mass: 58.933198, bond_radius: 1.16 },
    Element { atomic_number: 28, symbol: "Ni", atomic_weight: 58.693, monoisotopic_mass: 57.9353479, bond_radius: 1.15 },
    Element { atomic_number: 29, symbol: "Cu", atomic_weight: 63.546, monoisotopic_mass: 62.9296011, bond_radius: 1.17 },
    Element { atomic_number: 30, symbol: "Zn", atomic_weight: 65.38, monoisotopic_mass: 63.9291466, bond_radius: 1.25 },
    Element { atomic_number: 31, symbol: "Ga", atomic_weight: 69.723, monoisotopic_mass: 68.925581, bond_radius: 1.26 },
    Element { atomic_number: 32, symbol: "Ge", atomic_weight: 72.63, monoisotopic_mass: 73.9211782, bond_radius: 1.188 },
    Element { atomic_number: 33, symbol: "As", atomic_weight: 74.922, monoisotopic_mass: 74.9215964, bond_radius: 1.2 },
    Element { atomic_number: 34, symbol: "Se", atomic_weight: 78.96, monoisotopic_mass: 79.9165218, bond_radius: 1.17 },
    Element { atomic_number: 35, symbol: "Br", atomic_weight: 79.904, monoisotopic_mass: 78.9183376, bond_radius: 1.167 },
    Element { atomic_number: 36, symbol: "Kr", atomic_weight: 83.798, monoisotopic_mass: 83.911507, bond_radius: 1.91 },
    Element { atomic_number: 37, symbol: "Rb", atomic_weight: 85.468, monoisotopic_mass: 84.9117893, bond_radius: 2.16 },
    Element { atomic_number: 38, symbol: "Sr", atomic_weight: 87.62, monoisotopic_mass: 87.9056143, bond_radius: 1.91 },
    Element { atomic_number: 39, symbol: "Y", atomic_weight: 88.906, monoisotopic_mass: 88.9058479, bond_radius: 1.62 },
    Element { atomic_number: 40, symbol: "Zr", atomic_weight: 91.224, monoisotopic_mass: 89.9047037, bond_radius: 1.45 },
    Element { atomic_number: 41, symbol: "Nb", atomic_weight: 92.906, monoisotopic_mass: 92.9063775, bond_radius: 1.34 },
    Element { atomic_number: 42, symbol: "Mo", atomic_weight: 95.95, monoisotopic_mass: 97.9054078, bond_radius: 1.3 },
    Element { atomic_number: 43, symbol: "Tc", atomic_weight: 98.0, monoisotopic_mass: 97.907216, bond_radius: 1.27 },
    Element { atomic_number: 44, symbol: "Ru", atomic_weight: 101.07, monoisotopic_mass: 101.9043495, bond_radius: 1.25 },
    Element { atomic_number: 45, symbol: "Rh", atomic_weight: 102.906, monoisotopic_mass: 102.905504, bond_radius: 1.25 },
    Element { atomic_number: 46, symbol: "Pd", atomic_weight: 106.42, monoisotopic_mass: 105.903483, bond_radius: 1.28 },
    Element { atomic_number: 47, symbol: "Ag", atomic_weight: 107.868, monoisotopic_mass: 106.905093, bond_radius: 1.34 },
    Element { atomic_number: 48, symbol: "Cd", atomic_weight: 112.414, monoisotopic_mass: 113.9033581, bond_radius: 1.48 },
    Element { atomic_number: 49, symbol: "In", atomic_weight: 114.818, monoisotopic_mass: 114.903878, bond_radius: 1.44 },
    Element { atomic_number: 50, symbol: "Sn", atomic_weight: 118.71, monoisotopic_mass: 119.9021966, bond_radius: 1.385 },
    Element { atomic_number: 51, symbol: "Sb", atomic_weight: 121.76, monoisotopic_mass: 120.903818, bond_radius: 1.4 },
    Element { atomic_number: 52, symbol: "Te", atomic_weight: 127.6, monoisotopic_mass: 129.9062228, bond_radius: 1.378 },
    Element { atomic_number: 53, symbol: "I", atomic_weight: 126.904, monoisotopic_mass: 126.904468, bond_radius: 1.387 },
    Element { atomic_number: 54, symbol: "Xe", atomic_weight: 131.293, monoisotopic_mass: 131.9041545, bond_radius: 1.98 },
    Element { atomic_number: 55, symbol: "Cs", atomic_weight: 132.905, monoisotopic_mass: 132.905451933, bond_radius: 2.35 },
    Element { atomic_number: 56, symbol: "Ba", atomic_weight: 137.327, monoisotopic_mass: 137.905247, bond_radius: 1.98 },
    Element { atomic_number: 57, symbol: "La", atomic_weight: 138.905, monoisotopic_mass: 138.906353, bond_radius: 1.69 },
    Element { atomic_number: 58, symbol: "Ce", atomic_weight: 140.116, monoisotopic_mass: 139.905438, bond_radius: 1.83 },
    Element { atomic_number: 59, symbol: "Pr", atomic_weight: 140.908, monoisotopic_mass: 140.907652, bond_radius: 1.82 },
    Element { atomic_number: 60, symbol: "Nd", atomic_weight: 144.242, monoisotopic_mass: 141.907723, bond_radius: 1.81 },
    Element { atomic_number: 61, symbol: "Pm", atomic_weight: 145.0, monoisotopic_mass: 144.912749, bond_radius: 1.8 },
    Element { atomic_number: 62, symbol: "Sm", atomic_weight: 150.36, monoisotopic_mass: 151.919732, bond_radius: 1.8 },
    Element { atomic_number: 63, symbol: "Eu", atomic_weight: 151.964, monoisotopic_mass: 152.92123, bond_radius: 1.99 },
    Element { atomic_number: 64, symbol: "Gd", atomic_weight: 157.25, monoisotopic_mass: 157.924103, bond_radius: 1.79 },
    Element { atomic_number: 65, symbol: "Tb", atomic_weight: 158.925, monoisotopic_mass: 158.925346, bond_radius: 1.76 },
    Element { atomic_number: 66, symbol: "Dy", atomic_weight: 162.5, monoisotopic_mass: 163.929174, bond_radius: 1.75 },
    Element { atomic_number: 67, symbol: "Ho", atomic_weight: 164.93, monoisotopic_mass: 164.930322, bond_radius: 1.74 },
    Element { atomic_number: 68, symbol: "Er", atomic_weight: 167.259, monoisotopic_mass: 165.930293, bond_radius: 1.73 },
    Element { atomic_number: 69, symbol: "Tm", atomic_weight: 168.934, monoisotopic_mass: 168.934213, bond_radius: 1.72 },
    Element { atomic_number: 70, symbol: "Yb", atomic_weight: 173.045, monoisotopic_mass: 173.938862, bond_radius: 1.94 },
    Element { atomic_number: 71, symbol: "Lu", atomic_weight: 174.967, monoisotopic_mass: 174.940771, bond_radius: 1.72 },
    Element { atomic_number: 72, symbol: "Hf", atomic_weight: 178.49, monoisotopic_mass: 179.94655, bond_radius: 1.44 },
    Element { atomic_number: 73, symbol: "Ta", atomic_weight: 180.948, monoisotopic_mass: 180.947995, bond_radius: 1.34 },
    Element { atomic_number: 74, symbol: "W", atomic_weight: 183.84, monoisotopic_mass: 183.950931, bond_radius: 1.3 },
    Element { atomic_number: 75, symbol: "Re", atomic_weight: 186.207, monoisotopic_mass: 186.955753, bond_radius: 1.28 },
    Element { atomic_number: 76, symbol: "Os", atomic_weight: 190.23, monoisotopic_mass: 191.961481, bond_radius: 1.26 },
    Element { atomic_number: 77, symbol: "Ir", atomic_weight: 192.217, monoisotopic_mass: 192.962926, bond_radius: 1.27 },
    Element { atomic_number: 78, symbol: "Pt", atomic_weight: 195.084, monoisotopic_mass: 194.964791, bond_radius: 1.3 },
    Element { atomic_number: 79, symbol: "Au", atomic_weight: 196.967, monoisotopic_mass: 196.966569, bond_radius: 1.34 },
    Element { atomic_number: 80, symbol: "Hg", atomic_weight: 200.592, monoisotopic_mass: 201.970643, bond_radius: 1.49 },
    Element { atomic_number: 81, symbol: "Tl", atomic_weight: 204.38, monoisotopic_mass: 204.974427, bond_radius: 1.48 },
    Element { atomic_number: 82, symbol: "Pb", atomic_weight: 207.2, monoisotopic_mass: 207.976652, bond_radius: 1.48 },
    Element { atomic_number: 83, symbol: "Bi", atomic_weight: 208.98, monoisotopic_mass: 208.980398, bond_radius: 1.45 },
    Element { atomic_number: 84, symbol: "Po", atomic_weight: 209.0, monoisotopic_mass: 208.98243, bond_radius: 1.46 },
    Element { atomic_number: 85, symbol: "At", atomic_weight: 210.0, monoisotopic_mass: 209.987148, bond_radius: 1.45 },
    Element { atomic_number: 86, symbol: "Rn", atomic_weight: 222.0, monoisotopic_mass: 222.017577, bond_radius: 2.4 },
    Element { atomic_number: 87, symbol: "Fr", atomic_weight: 223.0, monoisotopic_mass: 223.019735, bond_radius: 2.0 },
    Element { atomic_number: 88, symbol: "Ra", atomic_weight: 226.0, monoisotopic_mass: 226.025409, bond_radius: 1.9 },
    Element { atomic_number: 89, symbol: "Ac", atomic_weight: 227.0, monoisotopic_mass: 227.027752, bond_radius: 1.88 },
    Element { atomic_number: 90, symbol: "Th", atomic_weight: 232.038, monoisotopic_mass: 232.038055, bond_radius: 1.79 },
    Element { atomic_number: 91, symbol: "Pa", atomic_weight: 231.036, monoisotopic_mass: 231.035884, bond_radius: 1.61 },
    Element { atomic_number: 92, symbol: "U", atomic_weight: 238.029, monoisotopic_mass: 238.050788, bond_radius: 1.58 },
    Element { atomic_number: 93, symbol: "Np", atomic_weight: 237.0, monoisotopic_mass: 237.048173, bond_radius: 1.55 },
    Element { atomic_number: 94, symbol: "Pu", atomic_weight: 244.0, monoisotopic_mass: 244.064204, bond_radius: 1.53 },
    Element { atomic_number: 95, symbol: "Am", atomic_weight: 243.0, monoisotopic_mass: 243.061381, bond_radius: 1.51 },
    Element { atomic_number: 96, symbol: "Cm", atomic_weight: 247.0, monoisotopic_mass: 247.070354, bond_radius: 1.5 },
    Element { atomic_number: 97, symbol: "Bk", atomic_weight: 247.0, monoisotopic_mass: 247.070307, bond_radius: 1.5 },
    Element { atomic_number: 98, symbol: "Cf", atomic_weight: 251.0, monoisotopic_mass: 251.079587, bond_radius: 1.5 },
    Element { atomic_number: 99, symbol: "Es", atomic_weight: 252.0, monoisotopic_mass: 252.08298, bond_radius: 1.5 },
    Element { atomic_number: 100, symbol: "Fm", atomic_weight: 257.0, monoisotopic_mass: 257.095105, bond_radius: 1.5 },
    Element { atomic_number: 101, symbol: "Md", atomic_weight: 258.0, monoisotopic_mass: 258.098431, bond_radius: 1.5 },
    Element { atomic_number: 102, symbol: "No", atomic_weight: 259.0, monoisotopic_mass: 259.10103, bond_radius: 1.5 },
    Element { atomic_number: 103, symbol: "Lr", atomic_weight: 262.0, monoisotopic_mass: 262.10963, bond_radius: 1.5 },
    Element { atomic_number: 104, symbol: "Rf", atomic_weight: 267.0, monoisotopic_mass: 267.12179, bond_radius: 1.5 },
    Element { atomic_number: 105, symbol: "Db", atomic_weight: 268.0, monoisotopic_mass: 268.12567, bond_radius: 1.5 },
    Element { atomic_number: 106, symbol: "Sg", atomic_weight: 271.0, monoisotopic_mass: 271.13393, bond_radius: 1.5 },
    Element { atomic_number: 107, symbol: "Bh", atomic_weight: 272.0, monoisotopic_mass: 272.13826, bond_radius: 1.5 },
    Element { atomic_number: 108, symbol: "Hs", atomic_weight: 270.0, monoisotopic_mass: 270.13429, bond_radius: 1.5 },
    Element { atomic_number: 109, symbol: "Mt", atomic_weight: 276.0, monoisotopic_mass: 276.15159, bond_radius: 1.5 },
    Element { atomic_number: 110, symbol: "Ds", atomic_weight: 281.0, monoisotopic_mass: 281.16451, bond_radius: 1.5 },
    Element { atomic_number: 111, symbol: "Rg", atomic_weight: 280.0, monoisotopic_mass: 280.16514, bond_radius: 1.5 },
    Element { atomic_number: 112, symbol: "Cn", atomic_weight: 285.0, monoisotopic_mass: 285.17712, bond_radius: 1.5 },
    Element { atomic_number: 113, symbol: "Nh", atomic_weight: 284.0, monoisotopic_mass: 284.17873, bond_radius: 1.5 },
    Element { atomic_number: 114, symbol: "Fl", atomic_weight: 289.0, monoisotopic_mass: 289.19042, bond_radius: 1.5 },
    Element { atomic_number: 115, symbol: "Mc", atomic_weight: 288.0, monoisotopic_mass: 288.19274, bond_radius: 1.5 },
    Element { atomic_number: 116, symbol: "Lv", atomic_weight: 293.0, monoisotopic_mass: 293.20449, bond_radius: 1.5 },
    Element { atomic_number: 117, symbol: "Ts", atomic_weight: 292.0, monoisotopic_mass: 292.20746, bond_radius: 1.5 },
    Element { atomic_number: 118, symbol: "Og", atomic_weight: 294.0, monoisotopic_mass: 294.21392, bond_radius: 1.5 },
];

/// Exact masses of the isotopes that show up in labelled compounds.
static ISOTOPE_MASSES: [(u8, u16, f64); 14] = [
    (1, 1, 1.0078250319),
    (1, 2, 2.014101778),
    (1, 3, 3.016049281),
    (6, 12, 12.0),
    (6, 13, 13.003354835),
    (6, 14, 14.003241989),
    (7, 14, 14.0030740052),
    (7, 15, 15.000108899),
    (8, 16, 15.9949146221),
    (8, 17, 16.999131757),
    (8, 18, 17.999159612),
    (15, 32, 31.973907643),
    (16, 34, 33.967867004),
    (53, 125, 124.904630164),
];

pub const DUMMY: u8 = 0;
pub const HYDROGEN: u8 = 1;
pub const BORON: u8 = 5;
pub const CARBON: u8 = 6;
pub const NITROGEN: u8 = 7;
pub const OXYGEN: u8 = 8;
pub const FLUORINE: u8 = 9;
pub const PHOSPHORUS: u8 = 15;
pub const SULFUR: u8 = 16;
pub const CHLORINE: u8 = 17;
pub const SELENIUM: u8 = 34;
pub const BROMINE: u8 = 35;
pub const IODINE: u8 = 53;

/// Look up an element by its symbol (e.g. "C", "Fe").
pub fn element_by_symbol(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

/// Look up an element by its atomic number; 0 is the dummy atom.
pub fn element_by_number(n: u8) -> Option<&'static Element> {
    ELEMENTS.get(n as usize)
}

/// Symbol for an atomic number, `"?"` when outside the table.
pub fn symbol(n: u8) -> &'static str {
    element_by_number(n).map(|e| e.symbol).unwrap_or("?")
}

/// Exact mass of a specific isotope. Isotopes missing from the table
/// are approximated by their mass number.
pub fn isotope_mass(atomic_number: u8, mass_number: u16) -> f64 {
    ISOTOPE_MASSES
        .iter()
        .find(|&&(z, a, _)| z == atomic_number && a == mass_number)
        .map(|&(_, _, mass)| mass)
        .unwrap_or(mass_number as f64)
}

/// Normal valences of the SMILES organic subset, lowest first.
/// Empty for elements that never receive implicit hydrogens.
pub fn default_valences(n: u8) -> &'static [u8] {
    match n {
        BORON => &[3],
        CARBON => &[4],
        NITROGEN => &[3],
        OXYGEN => &[2],
        PHOSPHORUS => &[3, 5],
        SULFUR => &[2, 4, 6],
        FLUORINE | CHLORINE | BROMINE | IODINE => &[1],
        _ => &[],
    }
}

pub fn is_halogen(n: u8) -> bool {
    matches!(n, FLUORINE | CHLORINE | BROMINE | IODINE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_carbon_by_symbol() {
        let c = element_by_symbol("C").unwrap();
        assert_eq!(c.atomic_number, 6);
        assert!((c.atomic_weight - 12.011).abs() < 0.001);
        assert_eq!(c.monoisotopic_mass, 12.0);
        assert_eq!(c.bond_radius, 0.77);
    }

    #[test]
    fn lookup_chlorine_by_number() {
        let cl = element_by_number(17).unwrap();
        assert_eq!(cl.symbol, "Cl");
        assert!((cl.monoisotopic_mass - 34.96885).abs() < 1e-4);
    }

    #[test]
    fn table_covers_the_periodic_table() {
        for n in 0..=118u8 {
            let e = element_by_number(n).unwrap();
            assert_eq!(e.atomic_number, n);
            assert_eq!(element_by_symbol(e.symbol).unwrap().atomic_number, n);
        }
        assert_eq!(element_by_symbol("Pt").unwrap().atomic_number, 78);
        assert!((element_by_symbol("Bi").unwrap().monoisotopic_mass - 208.9804).abs() < 1e-3);
        assert_eq!(element_by_symbol("Hg").unwrap().bond_radius, 1.49);
        assert_eq!(element_by_number(DUMMY).unwrap().symbol, "*");
    }

    #[test]
    fn unknown_returns_none() {
        assert!(element_by_symbol("Zz").is_none());
        assert!(element_by_number(119).is_none());
        assert_eq!(symbol(200), "?");
    }

    #[test]
    fn isotope_masses_are_exact() {
        assert!((isotope_mass(HYDROGEN, 2) - 2.014101778).abs() < 1e-9);
        assert!((isotope_mass(CARBON, 13) - 13.003354835).abs() < 1e-9);
        assert_eq!(isotope_mass(26, 57), 57.0);
    }

    #[test]
    fn organic_subset_valences() {
        assert_eq!(default_valences(SULFUR), &[2, 4, 6]);
        assert!(default_valences(26).is_empty());
        assert!(is_halogen(BROMINE));
        assert!(!is_halogen(OXYGEN));
    }
}
