//! Cross-module tests for the sweep core
//!
//! - `patching` - deck → input file rendering against the stock reference
//! - `sweeps` - mesh construction and coordinate assignment into a deck

mod sweeps;

/// The stock TUV 5.4 `usrinp` file, trimmed after the first comment lines
pub(crate) const REFERENCE_USRINP: &str = "\
TUV inputs:
==================================================================
inpfil =      usrinp   outfil =      usrout   nstr =            -2
lat =          0.000   lon =          0.000   tmzone =         0.0
iyear =         2002   imonth =           3   iday =            21
zstart =       0.000   zstop =       80.000   nz =              81
wstart =     280.000   wstop =      420.000   nwint =          140
tstart =      12.000   tstop =       20.000   nt =              10
lzenit =           F   alsurf =       0.100   psurf =       -999.0
o3col =      300.000   so2col =       0.000   no2col =       0.000
taucld =       0.000   zbase =        4.000   ztop =         5.000
tauaer =       0.235   ssaaer =       0.990   alpha =        1.000
dirsun =       1.000   difdn =        1.000   difup =        0.000
zout =         0.000   zaird =   -9.990E+02   ztemp =     -999.000
lirrad =           T   laflux =           F   lmmech =           F
lrates =           T   isfix =            0   nms =              7
ljvals =           F   ijfix =            0   nmj =              0
iwfix =            0   itfix =            0   izfix =            0
==================================================================

************* Can overwrite basic inputs here manually:
* Input and output files:
*   inpfil = input file name
*   outfil = output file name
";
