use circkit::libs::binlinks::*;
use clap::*;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("binlinks")
        .about("Bin link ends into density tracks")
        .after_help(
            r###"
Each selected end of a link is split over fixed-size bins. Per bin and per
chromosome on the other end, the overlapping bases and the number of links
are summed.

Input formats:
* One link per line:   id chr1 start1 end1 chr2 start2 end2
                       chr1 start1 end1 chr2 start2 end2 [options]
* One end per line:    id chr start end [options]
  Two consecutive lines form one link.
* Blank lines and lines starting with # are ignored.

Output styles:
* 0: chr start end value [fill_color=]
* 1: chr start end value fill_color=    (top target chromosome only)
* 2: chr start end value fill_color=    (one line per target chromosome)
* 3: chr start end v1,v2,...            (all target chromosomes)
     The matching fill_color= list is written to stderr first.

Notes:
* --link-end: 0 bins the first end, 1 the second, 2 both.
* --min-link-size and --max-link-size apply to both ends:
  min <= size < max. A link failing on either end is dropped.
* --normalize divides by the bin total and has no effect on style 0.
* --log takes log10 of non-zero values, zero stays 0.
* --removeintra zeroes links within the same chromosome.

Examples:
1. Link density in 1Mb bins:
   circkit binlinks links.txt --bin-size 1e6

2. Share of each partner chromosome, both ends binned:
   circkit binlinks links.txt --bin-size 1e6 --output-style 2 --normalize

3. Stacked histogram with colors prefixed by `hs`:
   circkit binlinks links.txt --bin-size 1e6 --output-style 3 --color-prefix hs

"###,
        )
        .arg(
            Arg::new("infile")
                .num_args(1)
                .index(1)
                .help("Input link file. [stdin] for standard input"),
        )
        .arg(
            Arg::new("links")
                .long("links")
                .alias("file")
                .num_args(1)
                .conflicts_with("infile")
                .help("Input link file, same as the positional argument"),
        )
        .arg(
            Arg::new("bin_size")
                .long("bin-size")
                .short('b')
                .required(true)
                .num_args(1)
                .value_parser(value_parser!(f64))
                .help("Bin size in bases"),
        )
        .arg(
            Arg::new("link_end")
                .long("link-end")
                .num_args(1)
                .value_parser(value_parser!(u8))
                .default_value("2")
                .help("Which link ends to bin: 0, 1 or 2 (both)"),
        )
        .arg(
            Arg::new("min_link_size")
                .long("min-link-size")
                .num_args(1)
                .value_parser(value_parser!(f64))
                .help("Drop links with an end shorter than this"),
        )
        .arg(
            Arg::new("max_link_size")
                .long("max-link-size")
                .num_args(1)
                .value_parser(value_parser!(f64))
                .help("Drop links with an end of this size or longer"),
        )
        .arg(
            Arg::new("output_style")
                .long("output-style")
                .short('s')
                .num_args(1)
                .value_parser(value_parser!(u8))
                .default_value("0")
                .help("Output style: 0, 1, 2 or 3"),
        )
        .arg(
            Arg::new("color_by_chr")
                .long("color-by-chr")
                .action(ArgAction::SetTrue)
                .help("Style 0: color each bin by its top target chromosome"),
        )
        .arg(
            Arg::new("color_prefix")
                .long("color-prefix")
                .num_args(1)
                .default_value("")
                .help("Prepended to chromosome names in fill_color="),
        )
        .arg(
            Arg::new("normalize")
                .long("normalize")
                .action(ArgAction::SetTrue)
                .help("Styles 1-3: divide values by the bin total"),
        )
        .arg(
            Arg::new("num")
                .long("num")
                .action(ArgAction::SetTrue)
                .help("Count links instead of summing overlapping bases"),
        )
        .arg(
            Arg::new("removeintra")
                .long("removeintra")
                .action(ArgAction::SetTrue)
                .help("Ignore links within the same chromosome"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .action(ArgAction::SetTrue)
                .help("Report log10 of the values"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .short('d')
                .action(ArgAction::Count)
                .help("Write diagnostics to stderr, repeat for more"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Options
    //----------------------------
    let opt = BinOpt {
        bin_size: *args.get_one::<f64>("bin_size").unwrap(),
        link_end: LinkEnd::try_from(*args.get_one::<u8>("link_end").unwrap())?,
        min_link_size: args.get_one::<f64>("min_link_size").copied(),
        max_link_size: args.get_one::<f64>("max_link_size").copied(),
        output_style: OutputStyle::try_from(*args.get_one::<u8>("output_style").unwrap())?,
        color_by_chr: args.get_flag("color_by_chr"),
        color_prefix: args.get_one::<String>("color_prefix").unwrap().to_string(),
        normalize: args.get_flag("normalize"),
        num: args.get_flag("num"),
        remove_intra: args.get_flag("removeintra"),
        log: args.get_flag("log"),
        debug: args.get_count("debug"),
    };
    opt.validate()?;

    let infile = args
        .get_one::<String>("links")
        .or_else(|| args.get_one::<String>("infile"))
        .map(|s| s.as_str())
        .unwrap_or("stdin");
    let reader = circkit::try_reader(infile).map_err(|source| BinError::InputNotFound {
        path: infile.to_string(),
        source,
    })?;

    //----------------------------
    // Ops
    //----------------------------
    let table = aggregate(reader, &opt)?;
    let renderer = Renderer::new(&opt, &table);

    //----------------------------
    // Output
    //----------------------------
    if let Some(header) = renderer.header() {
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{}", header)?;
    }

    let mut writer = circkit::writer(args.get_one::<String>("outfile").unwrap())?;
    for row in table.rows() {
        if opt.debug > 0 {
            let total = row.total();
            log::debug!(
                "{} bin {} size {} n {} targets {}",
                row.chr,
                row.bin,
                total.size,
                total.n,
                row.targets.len()
            );
        }
        for line in renderer.render(&row) {
            writeln!(writer, "{}", line)?;
        }
    }
    writer.flush()?;

    Ok(())
}
