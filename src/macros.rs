// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Builds a `Colour` from a `0xRRGGBB` literal.
macro_rules! hexcolour {
    ($colour:literal) => {
        $crate::chart::Colour::new(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            ($colour & 0x0000FF) as u8,
        )
    };
}
